//! A building block for three-dimensional orthogonal graph drawing.
//!
//! The crate stores simple undirected graphs together with the attributes
//! that an orthogonal drawing pipeline computes for them: an integer lattice
//! position per vertex, two oriented *arcs* per edge, and an axis-aligned
//! polyline *route* per edge.
//!
//! # What is an arc?
//!
//! Every undirected edge `{u, v}` owns two oriented views, the arcs `(u, v)`
//! and `(v, u)`. An arc carries the axis its first segment travels along
//! (its *color*, one of the three coordinate axes), the direction along that
//! axis (its *orientation*, `-1` or `+1`), and a handful of role flags used
//! while the drawing is computed. Arcs are first-class: they have stable
//! integer identifiers and can be used as nodes of other graphs.
//!
//! # How to build a graph
//!
//! The library provides a builder that constructs a graph from a given list
//! of edges.
//!
//! ```
//! use orthodraw_store::prelude::*;
//!
//! let graph: DrawingGraph = GraphBuilder::new()
//!     .edges(vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)])
//!     .build();
//!
//! assert_eq!(graph.vertex_count(), 4);
//! assert_eq!(graph.edge_count(), 5);
//! assert_eq!(graph.arc_count(), 10);
//!
//! assert_eq!(graph.degree(1), 3);
//! assert_eq!(graph.neighbors(1), &[0, 2, 3]);
//!
//! let arc = graph.arc_between(2, 1).unwrap();
//! assert_eq!((arc.start, arc.end), (2, 1));
//! ```
//!
//! Besides [`DrawingGraph`], the crate provides [`AdjacencyGraph`], a plain
//! undirected graph over integer vertices that supports vertex removal and
//! contraction, and [`Subgraph`], a borrowed view restricted by an alive
//! bitset that answers connectivity queries without cloning the topology.

pub mod builder;
pub mod graph;
pub mod prelude;
pub mod subgraph;

pub use crate::builder::GraphBuilder;
pub use crate::graph::adjacency::AdjacencyGraph;
pub use crate::graph::drawing::{Arc, DrawingGraph, Edge, Point, Port};
pub use crate::subgraph::Subgraph;
