//! Port assignment: an axis color and an orientation for every arc.
//!
//! Orientations come straight from the per-type slot tables. Colors are the
//! solution of a constraint problem: no two arcs on the same side of a
//! vertex may share an axis, the two arcs of an edge must differ unless one
//! is special, and movement arcs meeting head-to-tail must differ. The
//! constraints form a conflict graph over the arcs whose maximum degree is
//! small enough to be 3-colored with a Brooks-style algorithm after a
//! simplification pass has peeled off the arcs that can always be colored
//! at the end.

use ahash::AHashMap;
use log::debug;

use orthodraw_store::prelude::*;

use crate::coloring::{free_color, three_color};
use crate::order::{ordered_neighbors, position_in, rank_of, vertex_type};
use crate::slots::slot_neighbors;
use crate::Error;

/// Assigns every arc its color and orientation under `order`.
///
/// Requires [`label_roles`](crate::label_roles) to have run, so that
/// special and movement arcs are known.
pub fn assign_ports(graph: &mut DrawingGraph, order: &[usize]) -> Result<(), Error> {
    let rank = rank_of(order, graph.vertex_count());

    assign_orientations(graph, &rank)?;

    let conflicts = conflict_graph(graph, &rank);
    let (simplified, merges, middles, peeled) = simplify(&conflicts, graph, &rank);
    let partial = three_color(&simplified)?;
    let colors = transfer_colors(&conflicts, &simplified, &merges, partial, &middles, &peeled)?;

    for arc in graph.arc_ids() {
        graph.arc_mut(arc).color = Some(colors[arc].ok_or(Error::Uncolorable { node: arc })?);
    }

    Ok(())
}

/// Gives each arc of `v` the direction of the slot half it falls into; the
/// crowded side of the order points away from it.
fn assign_orientations(graph: &mut DrawingGraph, rank: &[usize]) -> Result<(), Error> {
    let mut assigned_total = 0;

    for v in graph.vertices() {
        let ordered = ordered_neighbors(graph, rank, v);
        let ty = vertex_type(v, &ordered);
        let slots = slot_neighbors(&ordered, position_in(&ordered, v), ty);

        let (first_half, second_half) = if ty.0 >= ty.1 { (-1, 1) } else { (1, -1) };

        let mut assigned = 0;
        for (slot, &neighbor) in slots.iter().enumerate() {
            let Some(neighbor) = neighbor else { continue };
            let sign = if slot < 3 { first_half } else { second_half };
            if let Some(arc) = graph.arc_between_mut(v, neighbor) {
                arc.orientation = Some(sign);
                assigned += 1;
            }
        }

        if assigned != graph.degree(v) {
            return Err(Error::PortCountMismatch {
                vertex: v,
                assigned,
                degree: graph.degree(v),
            });
        }
        assigned_total += assigned;
    }

    if assigned_total != graph.arc_count() {
        return Err(Error::ArcCountMismatch {
            assigned: assigned_total,
            total: graph.arc_count(),
        });
    }

    Ok(())
}

/// Builds the conflict graph over arc ids.
fn conflict_graph(graph: &DrawingGraph, rank: &[usize]) -> AdjacencyGraph {
    let mut conflicts = AdjacencyGraph::with_vertices(graph.arc_count());

    for v in graph.vertices() {
        let ordered = ordered_neighbors(graph, rank, v);
        let ty = vertex_type(v, &ordered);
        let at = position_in(&ordered, v);
        let slots = slot_neighbors(&ordered, at, ty);

        // same-side arcs can never share an axis
        for half in [&slots[..3], &slots[3..]] {
            let side: Vec<usize> = half
                .iter()
                .flatten()
                .filter_map(|&n| graph.arc_id(v, n))
                .collect();
            for (i, &a) in side.iter().enumerate() {
                for &b in &side[i + 1..] {
                    conflicts.add_edge(a, b);
                }
            }
        }

        // the second outgoing arc of a one-sided heavy vertex conflicts
        // with the incoming arc of its first neighbor
        let pair = match ty {
            (5, 0) | (6, 0) => Some((ordered[at + 2], ordered[at + 1])),
            (0, 5) | (0, 6) => Some((ordered[at - 2], ordered[at - 1])),
            _ => None,
        };
        if let Some((second, first)) = pair {
            if let (Some(a), Some(b)) = (graph.arc_id(v, second), graph.arc_id(first, v)) {
                conflicts.add_edge(a, b);
            }
        }
    }

    // the two arcs of an edge differ unless one of them is special
    for edge in graph.edge_ids() {
        let [a1, a2] = &graph.edge(edge).arcs;
        if !a1.special && !a2.special {
            conflicts.add_edge(2 * edge, 2 * edge + 1);
        }
    }

    // movement arcs that meet head-to-tail differ
    let movement: Vec<usize> = graph
        .arc_ids()
        .filter(|&arc| graph.arc(arc).movement)
        .collect();
    for &a in &movement {
        for &b in &movement {
            if a != b && graph.arc(b).start == graph.arc(a).end {
                conflicts.add_edge(a, b);
            }
        }
    }

    debug!(
        "Built conflict graph over {} arcs with {} edges",
        conflicts.vertex_count(),
        conflicts.edge_count()
    );

    conflicts
}

/// The simplification pass: peels arcs into two deferred layers and merges
/// pairs that must share a color, leaving a graph the 3-coloring handles.
///
/// Returns the simplified graph, the merge map (survivor to absorbed arc),
/// and two deferred layers: the peeled low-degree arcs are colored first,
/// the freed middle-slot arcs last, both after the simplified graph.
fn simplify(
    conflicts: &AdjacencyGraph,
    graph: &DrawingGraph,
    rank: &[usize],
) -> (AdjacencyGraph, AHashMap<usize, usize>, Vec<usize>, Vec<usize>) {
    let mut simplified = conflicts.clone();
    let mut merges = AHashMap::new();
    let mut middles = Vec::new();
    let mut peeled = Vec::new();

    let alive = |s: &AdjacencyGraph, arc: Option<usize>| arc.filter(|&a| !s.is_removed(a));

    // a degree-six vertex with unequal halves frees its middle slot
    for v in graph.vertices() {
        if graph.degree(v) != 6 {
            continue;
        }
        let ordered = ordered_neighbors(graph, rank, v);
        let ty = vertex_type(v, &ordered);
        if ty.0 == ty.1 {
            continue;
        }
        let slots = slot_neighbors(&ordered, position_in(&ordered, v), ty);
        if let Some(arc) = alive(&simplified, slots[2].and_then(|n| graph.arc_id(v, n))) {
            middles.push(arc);
            simplified.remove_vertex(arc);
        }
    }

    for v in graph.vertices() {
        let ordered = ordered_neighbors(graph, rank, v);
        let ty = vertex_type(v, &ordered);
        let slots = slot_neighbors(&ordered, position_in(&ordered, v), ty);

        match ty {
            (0, 5) | (0, 6) | (5, 0) | (6, 0) => {
                let (Some(first), Some(second)) = (slots[0], slots[1]) else {
                    continue;
                };
                if is_lopsided(graph, rank, first) {
                    let f_ordered = ordered_neighbors(graph, rank, first);
                    let f_ty = vertex_type(first, &f_ordered);
                    let f_slots = slot_neighbors(&f_ordered, position_in(&f_ordered, first), f_ty);
                    if let Some(absorbed) =
                        alive(&simplified, f_slots[1].and_then(|n| graph.arc_id(first, n)))
                    {
                        if let Some(survivor) = graph.arc_id(v, second) {
                            merges.insert(survivor, absorbed);
                            simplified.contract(survivor, absorbed);
                        }
                    }
                    if let Some(arc) = alive(&simplified, graph.arc_id(first, v)) {
                        peeled.push(arc);
                        simplified.remove_vertex(arc);
                    }
                    if let Some(arc) = alive(&simplified, graph.arc_id(v, first)) {
                        peeled.push(arc);
                        simplified.remove_vertex(arc);
                    }
                    if is_lopsided(graph, rank, second) {
                        if let Some(arc) = alive(&simplified, graph.arc_id(second, v)) {
                            peeled.push(arc);
                            simplified.remove_vertex(arc);
                        }
                    }
                } else if let Some(arc) = alive(&simplified, graph.arc_id(v, first)) {
                    peeled.push(arc);
                    simplified.remove_vertex(arc);
                }
            }
            (1, 4) | (1, 5) | (4, 1) | (5, 1) => {
                let Some(first) = slots[0] else { continue };
                let f_ordered = ordered_neighbors(graph, rank, first);
                let f_ty = vertex_type(first, &f_ordered);
                let f_at = position_in(&f_ordered, first);
                let outward = if f_ty.0 >= f_ty.1 {
                    f_ordered[f_at + 1]
                } else {
                    f_ordered[f_at - 1]
                };
                if f_ty != (0, 5) && f_ty != (5, 0) && outward != v {
                    if let Some(arc) = alive(&simplified, graph.arc_id(v, first)) {
                        peeled.push(arc);
                        simplified.remove_vertex(arc);
                    }
                }
            }
            (0, 4) | (4, 0) => {
                if let Some(arc) =
                    alive(&simplified, slots[0].and_then(|n| graph.arc_id(v, n)))
                {
                    peeled.push(arc);
                    simplified.remove_vertex(arc);
                }
            }
            _ => {}
        }
    }

    (simplified, merges, middles, peeled)
}

/// Whether `v` has five or six neighbors with exactly one of them on the
/// thin side.
fn is_lopsided(graph: &DrawingGraph, rank: &[usize], v: usize) -> bool {
    let ordered = ordered_neighbors(graph, rank, v);
    matches!(vertex_type(v, &ordered), (1, 4) | (1, 5) | (4, 1) | (5, 1))
}

/// Propagates the colors of the simplified graph back to all arcs: merged
/// arcs copy their survivor, then the deferred layers pick any free color
/// against the full conflict graph.
fn transfer_colors(
    conflicts: &AdjacencyGraph,
    simplified: &AdjacencyGraph,
    merges: &AHashMap<usize, usize>,
    partial: Vec<Option<usize>>,
    middles: &[usize],
    peeled: &[usize],
) -> Result<Vec<Option<usize>>, Error> {
    let mut colors = vec![None; conflicts.vertex_bound()];

    for arc in simplified.vertices() {
        colors[arc] = partial[arc];
    }
    for (&survivor, &absorbed) in merges {
        colors[absorbed] = colors[survivor];
    }
    for &arc in peeled.iter().chain(middles) {
        let neighbors = conflicts.neighbors(arc).iter().copied();
        colors[arc] =
            Some(free_color(neighbors, &colors).ok_or(Error::Uncolorable { node: arc })?);
    }

    Ok(colors)
}
