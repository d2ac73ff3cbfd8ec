pub mod adjacency;
pub mod drawing;
