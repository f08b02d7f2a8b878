//! Cluster analysis module

pub mod metrics;
pub mod profiles;
pub mod summary;

use serde::{Deserialize, Serialize};

pub use profiles::{compute_border_profiles, equivalence_classes, VertexProfile};
pub use summary::summarize_communities;

/// A community found by the optimizer, described for the betweenness stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Community id from the optimizer
    pub id: usize,

    /// Members of this cluster (original vertex ids)
    pub members: Vec<usize>,

    /// Size of the cluster
    pub size: usize,

    /// Density: internal edges / potential edges
    pub density: f32,

    /// Weight of edges inside the cluster
    pub internal_weight: f64,

    /// Weight of edges crossing the cluster boundary
    pub cut_weight: f64,

    /// Members with an edge leaving the cluster
    pub border_vertices: Vec<usize>,

    /// Interchangeable members, if profiles were computed
    pub profile_classes: Option<ProfileClasses>,
}

/// Members grouped by equal normalized border profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileClasses {
    /// Width of every profile in this cluster
    pub border_count: usize,

    /// Groups of original vertex ids, ordered by their smallest member
    pub classes: Vec<Vec<usize>>,
}
