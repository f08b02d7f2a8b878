//! Progress reporting for the multilevel optimizer

use std::time::Instant;

/// Size of the graph a level starts from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStats {
    pub level: usize,
    pub nodes: usize,
    pub edges: usize,
    pub total_weight: f64,
}

/// What a level achieved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelReport {
    pub level: usize,
    /// Index of the attempt that was kept
    pub winner: usize,
    pub modularity_before: f64,
    pub modularity_after: f64,
    pub improved: bool,
}

/// Receives progress from [`LouvainEvaluator`](super::LouvainEvaluator).
/// All methods default to doing nothing.
pub trait LevelObserver {
    fn level_started(&mut self, _stats: &LevelStats) {}

    fn level_finished(&mut self, _report: &LevelReport) {}

    fn converged(&mut self, _levels: usize, _modularity: f64) {}
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LevelObserver for NoopObserver {}

/// Reports progress through the `log` facade with per-level timings.
/// Verbose observers log at info level, quiet ones at debug.
#[derive(Debug)]
pub struct LogObserver {
    verbose: bool,
    started: Instant,
    level_started: Instant,
}

impl LogObserver {
    pub fn new(verbose: bool) -> Self {
        let now = Instant::now();
        Self {
            verbose,
            started: now,
            level_started: now,
        }
    }

    fn level(&self) -> log::Level {
        if self.verbose {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}

impl LevelObserver for LogObserver {
    fn level_started(&mut self, stats: &LevelStats) {
        self.level_started = Instant::now();
        log::log!(
            self.level(),
            "level {}: network size {} nodes, {} links, {} weight",
            stats.level,
            stats.nodes,
            stats.edges,
            stats.total_weight
        );
    }

    fn level_finished(&mut self, report: &LevelReport) {
        log::log!(
            self.level(),
            "level {}: attempt {} kept, modularity {:.6} -> {:.6} in {:?}",
            report.level,
            report.winner,
            report.modularity_before,
            report.modularity_after,
            self.level_started.elapsed()
        );
    }

    fn converged(&mut self, levels: usize, modularity: f64) {
        log::info!(
            "Louvain converged after {} levels with modularity {:.6} in {:?}",
            levels,
            modularity,
            self.started.elapsed()
        );
    }
}
