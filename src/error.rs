//! Error types shared by the profile algebra, the graph layer and the optimizer

use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the library. All of them are contract violations detected
/// at the faulting call; none of them leave partially mutated state behind.
#[derive(Debug, Error)]
pub enum Error {
    /// Border index outside `[0, border_count)`
    #[error("border index {index} out of range for profile of width {border_count}")]
    IndexOutOfRange { index: usize, border_count: usize },

    /// Two profiles of different widths met in a binary operation
    #[error("profile width mismatch: left has {left} borders, right has {right}")]
    ShapeMismatch { left: usize, right: usize },

    /// A value could not be represented in the target numeric type
    #[error("value {value} cannot be represented as {target}")]
    Conversion { value: String, target: &'static str },

    /// Integer division by zero
    #[error("division by zero in profile arithmetic")]
    DivisionByZero,

    /// Integer result outside the element type's range
    #[error("integer overflow during profile {operation}")]
    Overflow { operation: &'static str },

    /// Edge weight that is negative, NaN or infinite, or zero inside a cluster
    /// whose shortest paths are being counted
    #[error("invalid weight {weight} on edge ({source_node}, {target_node})")]
    InvalidWeight {
        source_node: usize,
        target_node: usize,
        weight: f64,
    },

    /// Node id referenced outside the graph
    #[error("node {node} out of range for graph with {node_count} nodes")]
    NodeOutOfRange { node: usize, node_count: usize },

    /// Optimizer tunable outside its valid domain
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// Worker pool could not be created
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
