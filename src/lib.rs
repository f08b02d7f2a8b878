//! Community decomposition and border-profile algebra for cluster-scoped
//! betweenness centrality

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod louvain;
pub mod profile;
pub mod storage;

pub use config::{Config, LouvainConfig};
pub use error::{Error, Result};
pub use graph::WeightedGraph;
pub use louvain::{ClusteringOutcome, Community, LouvainEvaluator};
pub use profile::{BorderProfile, ProfileElement};
