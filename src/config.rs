//! Configuration management for clustering and profile analysis

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunables of the multilevel Louvain optimizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LouvainConfig {
    /// Minimum modularity gain for a local-moving pass to be followed by another
    pub precision: f64,

    /// Number of independent attempts per level, also the worker count
    pub parallelism: usize,

    /// Base seed for the node orders of attempts after the first
    pub seed: u64,

    /// Upper bound on local-moving passes per attempt
    pub max_passes: Option<usize>,

    /// Report level progress at info rather than debug level
    pub verbose: bool,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            precision: 0.01,
            parallelism: 4,
            seed: 0,
            max_passes: None,
            verbose: true,
        }
    }
}

impl LouvainConfig {
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Reject values the optimizer cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.parallelism == 0 {
            return Err(Error::InvalidParameter {
                name: "parallelism",
                message: "at least one attempt per level is required".to_string(),
            });
        }
        if !self.precision.is_finite() || self.precision < 0.0 {
            return Err(Error::InvalidParameter {
                name: "precision",
                message: format!("must be finite and non-negative, got {}", self.precision),
            });
        }
        if self.max_passes == Some(0) {
            return Err(Error::InvalidParameter {
                name: "max_passes",
                message: "must allow at least one pass".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration of a full analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Optimizer tunables
    pub louvain: LouvainConfig,

    /// Communities smaller than this are left out of the summaries
    pub min_cluster_size: usize,

    /// Compute border profiles and equivalence classes per community
    pub compute_profiles: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            louvain: LouvainConfig::default(),
            min_cluster_size: 1,
            compute_profiles: false,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(louvain: LouvainConfig, min_cluster_size: usize, compute_profiles: bool) -> Self {
        Self {
            louvain,
            min_cluster_size,
            compute_profiles,
        }
    }
}
