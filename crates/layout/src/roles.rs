//! Movement/special role labels for arcs at high-degree vertices.
//!
//! A vertex whose neighbors lean heavily to one side of the ordering needs
//! help before ports can be assigned: its nearest arcs on the crowded side
//! are tagged as *movement* arcs (their endpoints will be made colinear on
//! the arc's color axis) or as *special* arcs (excluded from the standard
//! color conflict between the two arcs of an edge). The two roles are
//! mutually exclusive on a single arc.

use orthodraw_store::prelude::*;

use crate::order::{ordered_neighbors, position_in, rank_of, vertex_type};

/// Tags movement and special arcs based on each vertex's type under `order`.
pub fn label_roles(graph: &mut DrawingGraph, order: &[usize]) {
    let rank = rank_of(order, graph.vertex_count());

    for v in graph.vertices() {
        let ordered = ordered_neighbors(graph, &rank, v);
        let ty = vertex_type(v, &ordered);
        let at = position_in(&ordered, v);

        // (offset from v in its ordered list, movement or special)
        let tags: &[(isize, bool)] = match ty {
            (4, 0) | (4, 1) => &[(1, true)],
            (0, 4) | (1, 4) => &[(-1, true)],
            (5, 0) => &[(1, true), (2, true)],
            (0, 5) => &[(-1, true), (-2, true)],
            (4, 2) => &[(1, false)],
            (2, 4) => &[(-1, false)],
            (5, 1) => &[(1, true), (2, false)],
            (1, 5) => &[(-1, true), (-2, false)],
            (6, 0) => &[(1, true), (2, true), (3, false)],
            (0, 6) => &[(-1, true), (-2, true), (-3, false)],
            _ => &[],
        };

        for &(offset, movement) in tags {
            let neighbor = ordered[(at as isize + offset) as usize];
            if let Some(arc) = graph.arc_between_mut(v, neighbor) {
                if movement {
                    arc.movement = true;
                } else {
                    arc.special = true;
                }
            }
        }
    }
}
