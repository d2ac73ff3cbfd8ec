pub use crate::builder::GraphBuilder;

pub use crate::graph::adjacency::AdjacencyGraph;
pub use crate::graph::drawing::Arc;
pub use crate::graph::drawing::DrawingGraph;
pub use crate::graph::drawing::Edge;
pub use crate::graph::drawing::Point;
pub use crate::graph::drawing::Port;

pub use crate::subgraph::Subgraph;
