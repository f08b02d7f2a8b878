//! Graph representation module

pub mod builder;
pub mod compressed;
pub mod subgraph;

pub use builder::GraphBuilder;
pub use compressed::WeightedGraph;
pub use subgraph::{induced_subgraph, Subgraph};
