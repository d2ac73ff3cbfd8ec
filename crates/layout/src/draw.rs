//! The drawing pipeline.
//!
//! Places every vertex on the main diagonal of the lattice, spaced by
//! three, using the balanced ordering as the ranking on all three axes.
//! Movement arcs then bend the diagonal locally: on the arc's color axis
//! only, its start vertex is re-ranked to sit directly behind its end
//! vertex, which makes the two endpoints colinear on that axis. Routing
//! and crossing removal finish the drawing.

use std::time::Instant;

use log::info;
use num_format::{Locale, ToFormattedString};

use orthodraw_store::prelude::*;

use crate::cross::remove_crossings;
use crate::order::{balanced_order, rank_of, OrderingConfig};
use crate::ports::assign_ports;
use crate::roles::label_roles;
use crate::route::route_edges;
use crate::Error;

/// The largest vertex degree the drawing supports.
pub const MAX_DEGREE: usize = 6;

/// Computes the complete drawing in place: positions for every vertex,
/// ports for every arc, and a crossing-free route for every edge.
pub fn draw(graph: &mut DrawingGraph) -> Result<(), Error> {
    draw_with(graph, OrderingConfig::default())
}

/// Like [`draw`], with explicit ordering configuration.
pub fn draw_with(graph: &mut DrawingGraph, config: OrderingConfig) -> Result<(), Error> {
    let start = Instant::now();

    for v in graph.vertices() {
        if graph.degree(v) > MAX_DEGREE {
            return Err(Error::DegreeTooLarge {
                vertex: v,
                degree: graph.degree(v),
            });
        }
    }

    let order = balanced_order(graph, config);
    label_roles(graph, &order);
    assign_ports(graph, &order)?;
    place_vertices(graph, &order)?;
    route_edges(graph)?;
    remove_crossings(graph)?;

    info!(
        "Drew {} vertices and {} edges in {:?}",
        graph.vertex_count().to_formatted_string(&Locale::en),
        graph.edge_count().to_formatted_string(&Locale::en),
        start.elapsed()
    );

    Ok(())
}

/// Assigns positions from per-axis orders: each starts as the balanced
/// order, then every movement arc re-ranks its start vertex to directly
/// follow its end vertex on the arc's color axis.
///
/// Requires assigned ports, since the displacement happens on the color
/// axis of the movement arc.
pub fn place_vertices(graph: &mut DrawingGraph, order: &[usize]) -> Result<(), Error> {
    let mut axes: [Vec<usize>; 3] = [order.to_vec(), order.to_vec(), order.to_vec()];

    for arc in graph.arc_ids() {
        let arc = graph.arc(arc);
        if !arc.movement {
            continue;
        }
        let axis = arc.color.ok_or_else(|| Error::missing_port(arc))?;
        let (start, end) = (arc.start, arc.end);

        let lane = &mut axes[axis];
        lane.retain(|&x| x != start);
        let at = lane.iter().position(|&x| x == end).map(|i| i + 1);
        match at {
            Some(at) => lane.insert(at, start),
            None => lane.push(start),
        }
    }

    let ranks = axes.map(|lane| rank_of(&lane, graph.vertex_count()));
    for v in graph.vertices() {
        let position = [
            3 * (ranks[0][v] as i32 + 1),
            3 * (ranks[1][v] as i32 + 1),
            3 * (ranks[2][v] as i32 + 1),
        ];
        graph.set_position(v, position);
    }

    Ok(())
}
