use log::info;

use crate::graph::drawing::DrawingGraph;

/// A builder to create a [`DrawingGraph`] from a list of edges.
///
/// The number of vertices is inferred from the largest endpoint unless
/// [`node_count`](GraphBuilder::node_count) asks for more, e.g. to keep
/// trailing isolated vertices.
///
/// # Examples
///
/// ```
/// use orthodraw_store::prelude::*;
///
/// let graph: DrawingGraph = GraphBuilder::new()
///     .edges(vec![(0, 1), (1, 2), (2, 0)])
///     .build();
///
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 3);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    edges: Vec<(usize, usize)>,
    node_count: Option<usize>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges<I>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        self.edges.extend(edges);
        self
    }

    pub fn node_count(mut self, node_count: usize) -> Self {
        self.node_count = Some(node_count);
        self
    }

    pub fn build(self) -> DrawingGraph {
        let inferred = self
            .edges
            .iter()
            .map(|&(u, v)| u.max(v) + 1)
            .max()
            .unwrap_or(0);
        let node_count = self.node_count.unwrap_or(0).max(inferred);

        let mut graph = DrawingGraph::new();
        for _ in 0..node_count {
            graph.add_vertex();
        }
        for (u, v) in self.edges {
            graph.add_edge(u, v);
        }

        info!(
            "Created drawing graph (vertex_count = {}, edge_count = {})",
            graph.vertex_count(),
            graph.edge_count()
        );

        graph
    }
}
