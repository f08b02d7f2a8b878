//! Input data loading

pub mod parquet;

pub use parquet::{load_weighted_edges, EdgeColumns};
