//! Three-dimensional orthogonal drawings of graphs with maximum degree six.
//!
//! Every vertex is placed on the integer lattice and every edge is routed as
//! a chain of axis-aligned segments with at most two bends per half-edge.
//! The three coordinate axes act as the three *colors* of the drawing: each
//! arc (oriented half-edge) is assigned the axis it initially travels along
//! and a direction on that axis, such that no two arcs leave a vertex
//! through the same (axis, direction) port.
//!
//! The pipeline runs in five stages over a [`DrawingGraph`]:
//!
//! 1. a balanced linear ordering of the vertices, shared by all three axes
//!    ([`balanced_order`]),
//! 2. role labels for arcs near high-degree vertices ([`label_roles`]),
//! 3. port assignment by 3-coloring an auxiliary conflict graph of maximum
//!    degree three ([`assign_ports`]),
//! 4. diagonal placement plus a local displacement along one axis for each
//!    movement arc ([`place_vertices`]),
//! 5. edge routing and a two-phase crossing removal that swaps colliding
//!    ports until no segment crossing remains ([`route_edges`],
//!    [`remove_crossings`]).
//!
//! [`draw`] composes all five stages and mutates the graph in place.
//!
//! ```
//! use orthodraw::prelude::*;
//!
//! let mut graph: DrawingGraph = GraphBuilder::new()
//!     .edges(vec![(0, 1), (1, 2), (2, 0)])
//!     .build();
//!
//! draw(&mut graph)?;
//!
//! assert_eq!(graph.position(0), Some([3, 3, 3]));
//! for edge in graph.edge_ids() {
//!     let route = graph.edge(edge).route.as_ref().unwrap();
//!     assert!(route.len() >= 4);
//! }
//! # Ok::<(), orthodraw::Error>(())
//! ```
//!
//! Graphs of maximum degree larger than six are rejected, as are inputs
//! whose port-assignment subproblem contains a complete graph on Δ + 1
//! vertices; both surface as an [`Error`].

pub mod coloring;
pub mod cross;
pub mod draw;
pub mod order;
pub mod ports;
pub mod prelude;
pub mod roles;
pub mod route;
mod slots;

pub use crate::coloring::three_color;
pub use crate::cross::{cross_check, remove_crossings, segment_cross, CrossingKind};
pub use crate::draw::{draw, draw_with, place_vertices, MAX_DEGREE};
pub use crate::order::{balanced_order, refine_order, OrderingConfig, Requeue};
pub use crate::ports::assign_ports;
pub use crate::roles::label_roles;
pub use crate::route::route_edges;

use orthodraw_store::prelude::*;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("vertex {vertex} has degree {degree}, drawings support at most degree six")]
    DegreeTooLarge { vertex: usize, degree: usize },
    #[error("graph contains a complete subgraph on {size} vertices, which cannot be three-colored")]
    ForbiddenClique { size: usize },
    #[error("assigned orientations to {assigned} arcs at vertex {vertex} of degree {degree}")]
    PortCountMismatch {
        vertex: usize,
        assigned: usize,
        degree: usize,
    },
    #[error("assigned orientations to {assigned} of {total} arcs")]
    ArcCountMismatch { assigned: usize, total: usize },
    #[error("no color left for conflict-graph node {node}")]
    Uncolorable { node: usize },
    #[error("conflict-graph ordering left {remaining} nodes unreached")]
    OrderingIncomplete { remaining: usize },
    #[error("arc ({start}, {end}) has no port assigned")]
    MissingPort { start: usize, end: usize },
    #[error("vertex {vertex} has no position assigned")]
    Unplaced { vertex: usize },
}

impl Error {
    pub(crate) fn missing_port(arc: &Arc) -> Self {
        Error::MissingPort {
            start: arc.start,
            end: arc.end,
        }
    }
}
