//! Edge routing.
//!
//! Every edge becomes a polyline of four to six lattice points between the
//! positions of its endpoints. The shape is decided by the ports of its two
//! arcs: whether their axes differ and whether each arc points *toward* its
//! far endpoint along its own axis. An arc that points away from its target
//! first takes a single *anchor* step in its port direction before the
//! route turns; the anchor flag records that extra bend for the crossing
//! classification.

use std::time::Instant;

use log::info;
use num_format::{Locale, ToFormattedString};
use rayon::prelude::*;

use orthodraw_store::prelude::*;

use crate::Error;

/// Routes every edge of a placed graph, in parallel; the routings are
/// independent of each other.
pub fn route_edges(graph: &mut DrawingGraph) -> Result<(), Error> {
    let start = Instant::now();
    let positions = positions(graph)?;

    graph
        .edges_mut()
        .par_iter_mut()
        .try_for_each(|edge| route_edge(edge, &positions))?;

    info!(
        "Routed {} edges in {:?}",
        graph.edge_count().to_formatted_string(&Locale::en),
        start.elapsed()
    );

    Ok(())
}

pub(crate) fn positions(graph: &DrawingGraph) -> Result<Vec<Point>, Error> {
    graph
        .vertices()
        .map(|v| graph.position(v).ok_or(Error::Unplaced { vertex: v }))
        .collect()
}

/// Recomputes the route and anchor flags of one edge from its arc ports
/// and the endpoint positions.
pub(crate) fn route_edge(edge: &mut Edge, positions: &[Point]) -> Result<(), Error> {
    let p1 = edge.arcs[0].port().ok_or_else(|| Error::missing_port(&edge.arcs[0]))?;
    let p2 = edge.arcs[1].port().ok_or_else(|| Error::missing_port(&edge.arcs[1]))?;
    let s = positions[edge.arcs[0].start];
    let e = positions[edge.arcs[0].end];

    let perpendicular = p1.axis != p2.axis;
    let toward1 = points_toward(p1, s, e);
    let toward2 = points_toward(p2, e, s);

    let (route, anchors) = match (perpendicular, toward1, toward2) {
        (true, true, true) => (route_direct(s, e, p1, p2), [false, false]),
        (_, false, true) => (route_anchored(s, e, p1, p2), [true, false]),
        (_, true, false) => {
            let mut route = route_anchored(e, s, p2, p1);
            route.reverse();
            (route, [false, true])
        }
        (false, true, true) => (route_anchored(s, e, p1, p2), [true, false]),
        (_, false, false) => (route_double_anchored(s, e, p1, p2), [true, true]),
    };

    edge.arcs[0].anchor = anchors[0];
    edge.arcs[1].anchor = anchors[1];
    edge.route = Some(route);

    Ok(())
}

/// Whether the port's direction agrees with where the far endpoint lies
/// along the port's axis.
fn points_toward(port: Port, from: Point, to: Point) -> bool {
    (to[port.axis] - from[port.axis]).signum() == port.sign
}

/// The axis not used by `a` and `b`; for `a == b` the smaller of the two
/// remaining axes.
pub(crate) fn third_axis(a: usize, b: usize) -> usize {
    (0..3).find(|&c| c != a && c != b).unwrap_or(2)
}

/// Both arcs point toward their targets on different axes: two bends, no
/// anchors.
fn route_direct(s: Point, e: Point, p1: Port, p2: Port) -> Vec<Point> {
    let mut q1 = s;
    q1[p1.axis] = e[p1.axis];
    let mut q2 = q1;
    let middle = third_axis(p1.axis, p2.axis);
    q2[middle] = e[middle];
    vec![s, q1, q2, e]
}

/// The leading arc needs an anchor step (or the axes coincide): one unit
/// along the leading port, across the middle axis, then onto the target.
fn route_anchored(s: Point, e: Point, lead: Port, trail: Port) -> Vec<Point> {
    let mut q1 = s;
    q1[lead.axis] += lead.sign;
    let mut q2 = q1;
    let middle = third_axis(lead.axis, trail.axis);
    q2[middle] = e[middle];
    let mut q3 = q2;
    if lead.axis != trail.axis {
        q3[lead.axis] = e[lead.axis];
    } else {
        let remaining = third_axis(lead.axis, middle);
        q3[remaining] = e[remaining];
    }
    vec![s, q1, q2, q3, e]
}

/// Neither arc points toward its target: anchor steps at both ends.
fn route_double_anchored(s: Point, e: Point, p1: Port, p2: Port) -> Vec<Point> {
    let mut q1 = s;
    q1[p1.axis] += p1.sign;
    let mut q4 = e;
    q4[p2.axis] += p2.sign;

    let (q2, q3) = if p1.axis != p2.axis {
        let mut q2 = q1;
        q2[p2.axis] += p2.sign;
        let mut q3 = q2;
        let middle = third_axis(p1.axis, p2.axis);
        q3[middle] = e[middle];
        (q2, q3)
    } else {
        let mut q2 = q1;
        let middle = third_axis(p1.axis, p2.axis);
        q2[middle] = e[middle];
        let mut q3 = q2;
        q3[p2.axis] += p2.sign;
        (q2, q3)
    };

    vec![s, q1, q2, q3, q4, e]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_with_ports(s: usize, e: usize, p1: (usize, i32), p2: (usize, i32)) -> Edge {
        let mut graph = DrawingGraph::new();
        graph.add_vertex();
        graph.add_vertex();
        graph.add_edge(s, e);
        let mut edge = graph.edge(0).clone();
        edge.arcs[0].color = Some(p1.0);
        edge.arcs[0].orientation = Some(p1.1);
        edge.arcs[1].color = Some(p2.0);
        edge.arcs[1].orientation = Some(p2.1);
        edge
    }

    fn assert_unit_steps(route: &[Point]) {
        for pair in route.windows(2) {
            let changed = (0..3).filter(|&c| pair[0][c] != pair[1][c]).count();
            assert_eq!(changed, 1, "{pair:?} must differ in exactly one axis");
        }
    }

    #[test]
    fn direct_route_has_two_bends() {
        let mut edge = edge_with_ports(0, 1, (0, 1), (2, -1));
        let positions = vec![[3, 3, 3], [6, 6, 6]];
        route_edge(&mut edge, &positions).unwrap();

        let route = edge.route.as_ref().unwrap();
        assert_eq!(route, &vec![[3, 3, 3], [6, 3, 3], [6, 6, 3], [6, 6, 6]]);
        assert!(!edge.arcs[0].anchor && !edge.arcs[1].anchor);
        assert_unit_steps(route);
    }

    #[test]
    fn single_anchor_when_leading_arc_points_away() {
        // arc 0 points in negative x although the target lies in positive x
        let mut edge = edge_with_ports(0, 1, (0, -1), (2, -1));
        let positions = vec![[3, 3, 3], [6, 6, 6]];
        route_edge(&mut edge, &positions).unwrap();

        let route = edge.route.as_ref().unwrap();
        assert_eq!(route.len(), 5);
        assert_eq!(route[0], [3, 3, 3]);
        assert_eq!(route[1], [2, 3, 3]);
        assert_eq!(route[4], [6, 6, 6]);
        assert!(edge.arcs[0].anchor);
        assert!(!edge.arcs[1].anchor);
        assert_unit_steps(route);
    }

    #[test]
    fn mirrored_anchor_routes_in_reverse() {
        // the trailing arc is the one pointing away
        let mut edge = edge_with_ports(0, 1, (0, 1), (2, 1));
        let positions = vec![[3, 3, 3], [6, 6, 6]];
        route_edge(&mut edge, &positions).unwrap();

        let route = edge.route.as_ref().unwrap();
        assert_eq!(route.len(), 5);
        assert_eq!(route[0], [3, 3, 3]);
        assert_eq!(route[4], [6, 6, 6]);
        assert_eq!(route[3], [6, 6, 7]);
        assert!(!edge.arcs[0].anchor);
        assert!(edge.arcs[1].anchor);
        assert_unit_steps(route);
    }

    #[test]
    fn parallel_axes_route_through_the_remaining_axes() {
        let mut edge = edge_with_ports(0, 1, (1, 1), (1, -1));
        let positions = vec![[3, 3, 3], [6, 6, 6]];
        route_edge(&mut edge, &positions).unwrap();

        let route = edge.route.as_ref().unwrap();
        assert_eq!(route.len(), 5);
        assert_eq!(route[1], [3, 4, 3]);
        assert!(edge.arcs[0].anchor);
        assert!(!edge.arcs[1].anchor);
        assert_unit_steps(route);
    }

    #[test]
    fn double_anchor_when_both_arcs_point_away() {
        // the endpoints are colinear on the trailing axis, as a movement
        // arc leaves them
        let mut edge = edge_with_ports(0, 1, (0, -1), (2, 1));
        let positions = vec![[3, 3, 3], [6, 6, 3]];
        route_edge(&mut edge, &positions).unwrap();

        let route = edge.route.as_ref().unwrap();
        assert_eq!(
            route,
            &vec![
                [3, 3, 3],
                [2, 3, 3],
                [2, 3, 4],
                [2, 6, 4],
                [6, 6, 4],
                [6, 6, 3]
            ]
        );
        assert!(edge.arcs[0].anchor && edge.arcs[1].anchor);
        assert_unit_steps(route);
    }

    #[test]
    fn missing_port_is_reported() {
        let mut graph = DrawingGraph::new();
        graph.add_vertex();
        graph.add_vertex();
        graph.add_edge(0, 1);
        let mut edge = graph.edge(0).clone();
        let positions = vec![[3, 3, 3], [6, 6, 6]];

        assert_eq!(
            route_edge(&mut edge, &positions).unwrap_err(),
            Error::MissingPort { start: 0, end: 1 }
        );
    }
}
