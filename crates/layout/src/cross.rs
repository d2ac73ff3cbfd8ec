//! Crossing detection and removal.
//!
//! After routing, the only crossings left are between edges that share an
//! endpoint; they are repaired by swapping the (color, orientation) pairs
//! of the two arcs leaving the shared vertex and re-routing both edges.
//! Crossings whose repair can cascade to the neighbors are fixed first by
//! a worklist pass that converges; the remaining kinds are cleared in one
//! final sweep.

use std::collections::VecDeque;
use std::time::Instant;

use log::info;

use orthodraw_store::prelude::*;

use crate::route::{positions, route_edge, third_axis};
use crate::Error;

/// Which segments of two routes leaving a common vertex collide.
///
/// A route's *lead* is its first segment out of the shared vertex, its
/// *leg* the segment following an anchor step, and its *tail* the segment
/// after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingKind {
    /// The post-anchor legs of two anchored routes collide.
    LegLeg,
    /// An anchored route's tail collides with an unanchored route's lead.
    TailLead,
    /// A tail collides with the other route's post-anchor leg.
    TailLeg,
    /// The two tails collide.
    TailTail,
}

/// Whether two axis-aligned segments cross: they must run along different
/// axes, share the coordinate on the remaining axis, and each must reach
/// the other's line in the common plane.
///
/// Collinear overlaps and zero-length segments never register.
pub fn segment_cross(s1: (Point, Point), s2: (Point, Point)) -> bool {
    let (Some(a), Some(b)) = (axis_of(s1), axis_of(s2)) else {
        return false;
    };
    if a == b {
        return false;
    }
    let c = third_axis(a, b);

    s1.0[c] == s2.0[c] && within(s2.0[a], s1.0[a], s1.1[a]) && within(s1.0[b], s2.0[b], s2.1[b])
}

/// The single axis along which the segment runs.
fn axis_of((p, q): (Point, Point)) -> Option<usize> {
    let mut axis = None;
    for c in 0..3 {
        if p[c] != q[c] {
            if axis.is_some() {
                return None;
            }
            axis = Some(c);
        }
    }
    axis
}

fn within(p: i32, a: i32, b: i32) -> bool {
    a.min(b) <= p && p <= a.max(b)
}

/// The arc indices through which two edges share a vertex, if they do.
fn shared_vertex(e1: &Edge, e2: &Edge) -> Option<(usize, usize)> {
    for i in 0..2 {
        for j in 0..2 {
            if e1.arcs[i].start == e2.arcs[j].start {
                return Some((i, j));
            }
        }
    }
    None
}

/// Classifies the crossing between two routed edges that share a vertex.
///
/// Both routes are read outward from the shared vertex; which of their
/// early segments collide, together with the anchor flags of the two arcs,
/// determines the kind. Returns `None` for edge pairs that do not share a
/// vertex, are not routed yet, or do not collide.
pub fn cross_check(e1: &Edge, e2: &Edge) -> Option<CrossingKind> {
    let (i, j) = shared_vertex(e1, e2)?;
    let route1 = oriented(e1, i)?;
    let route2 = oriented(e2, j)?;
    let seg1 = |k: usize| (route1[k], route1[k + 1]);
    let seg2 = |k: usize| (route2[k], route2[k + 1]);

    match (e1.arcs[i].anchor, e2.arcs[j].anchor) {
        (true, true) => {
            if segment_cross(seg1(1), seg2(1)) {
                Some(CrossingKind::LegLeg)
            } else if segment_cross(seg1(2), seg2(1)) {
                Some(CrossingKind::TailLeg)
            } else if segment_cross(seg1(2), seg2(2)) {
                Some(CrossingKind::TailTail)
            } else {
                None
            }
        }
        (true, false) => {
            if segment_cross(seg1(2), seg2(0)) {
                Some(CrossingKind::TailLead)
            } else if segment_cross(seg1(2), seg2(1)) {
                Some(CrossingKind::TailTail)
            } else {
                None
            }
        }
        (false, true) => {
            if segment_cross(seg1(1), seg2(1)) {
                Some(CrossingKind::TailLeg)
            } else if segment_cross(seg1(1), seg2(2)) {
                Some(CrossingKind::TailTail)
            } else {
                None
            }
        }
        (false, false) => {
            if segment_cross(seg1(1), seg2(1)) {
                Some(CrossingKind::TailTail)
            } else {
                None
            }
        }
    }
}

/// The route of `edge` read from the endpoint of arc `i`.
fn oriented(edge: &Edge, i: usize) -> Option<Vec<Point>> {
    let route = edge.route.as_ref()?;
    Some(if i == 0 {
        route.clone()
    } else {
        route.iter().rev().copied().collect()
    })
}

/// Removes every crossing by port swaps at shared vertices.
///
/// The first, worklist-driven phase repairs tail collisions, which may
/// cascade to neighboring vertices; the second phase clears the remaining
/// leg collisions in a single pass.
pub fn remove_crossings(graph: &mut DrawingGraph) -> Result<(), Error> {
    let start = Instant::now();
    let positions = positions(graph)?;
    let mut swaps = 0_usize;

    let mut work: VecDeque<usize> = graph.vertices().collect();
    while let Some(&v) = work.front() {
        let mut acted = false;
        for (u, w) in neighbor_pairs(graph, v) {
            let kind = check_at(graph, v, u, w);
            if matches!(kind, Some(CrossingKind::TailLeg | CrossingKind::TailTail))
                && swap_ports(graph, v, u, w, &positions)?
            {
                work.push_back(u);
                work.push_back(w);
                swaps += 1;
                acted = true;
            }
        }
        if !acted {
            work.pop_front();
        }
    }

    for v in graph.vertices() {
        for (u, w) in neighbor_pairs(graph, v) {
            let kind = check_at(graph, v, u, w);
            if matches!(kind, Some(CrossingKind::LegLeg | CrossingKind::TailLead))
                && swap_ports(graph, v, u, w, &positions)?
            {
                swaps += 1;
            }
        }
    }

    info!(
        "Removed crossings with {} port swaps in {:?}",
        swaps,
        start.elapsed()
    );

    Ok(())
}

fn neighbor_pairs(graph: &DrawingGraph, v: usize) -> Vec<(usize, usize)> {
    let neighbors = graph.neighbors(v);
    let mut pairs = Vec::new();
    for (i, &u) in neighbors.iter().enumerate() {
        for &w in &neighbors[i + 1..] {
            pairs.push((u, w));
        }
    }
    pairs
}

fn check_at(graph: &DrawingGraph, v: usize, u: usize, w: usize) -> Option<CrossingKind> {
    let eu = graph.edge_between(v, u)?;
    let ew = graph.edge_between(v, w)?;
    cross_check(graph.edge(eu), graph.edge(ew))
}

/// Swaps the (color, orientation) pairs of the arcs `v -> u` and `v -> w`
/// and re-routes both edges. Returns `false` when the two arcs carry the
/// same pair, which a swap cannot repair.
fn swap_ports(
    graph: &mut DrawingGraph,
    v: usize,
    u: usize,
    w: usize,
    positions: &[Point],
) -> Result<bool, Error> {
    let (first, second) = match (graph.arc_id(v, u), graph.arc_id(v, w)) {
        (Some(first), Some(second)) => (first, second),
        _ => return Ok(false),
    };

    let (c1, o1) = {
        let arc = graph.arc(first);
        (arc.color, arc.orientation)
    };
    let (c2, o2) = {
        let arc = graph.arc(second);
        (arc.color, arc.orientation)
    };
    if (c1, o1) == (c2, o2) {
        return Ok(false);
    }

    {
        let arc = graph.arc_mut(first);
        arc.color = c2;
        arc.orientation = o2;
    }
    {
        let arc = graph.arc_mut(second);
        arc.color = c1;
        arc.orientation = o1;
    }

    route_edge(graph.edge_mut(DrawingGraph::edge_of_arc(first)), positions)?;
    route_edge(graph.edge_mut(DrawingGraph::edge_of_arc(second)), positions)?;

    Ok(true)
}
