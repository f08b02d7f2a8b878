//! Best-of-N multilevel Louvain driver

use super::{compose_and_renumber, Community, LevelObserver, LevelReport, LevelStats, LogObserver};
use super::Partition;
use crate::config::LouvainConfig;
use crate::error::Result;
use crate::graph::WeightedGraph;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::borrow::Cow;

/// Final community structure of a graph
#[derive(Debug, Clone)]
pub struct ClusteringOutcome<'g> {
    /// One entry per community id, ids dense and zero-based
    pub communities: Vec<Community<'g>>,

    /// Community id of every original vertex
    pub node_to_community: Vec<usize>,

    /// Modularity reported by the last level
    pub modularity: f64,

    /// Number of levels run, including the final non-improving one
    pub levels: usize,
}

/// Result of one local-moving attempt
struct Attempt<'g> {
    partition: Partition<'g>,
    modularity: f64,
    improved: bool,
}

/// Multilevel Louvain optimizer running `parallelism` attempts per level
#[derive(Debug, Clone, Default)]
pub struct LouvainEvaluator {
    config: LouvainConfig,
}

impl LouvainEvaluator {
    pub fn new(config: LouvainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LouvainConfig {
        &self.config
    }

    /// Cluster `graph`, reporting progress through the `log` facade
    pub fn evaluate<'g>(&self, graph: &'g WeightedGraph) -> Result<ClusteringOutcome<'g>> {
        let mut observer = LogObserver::new(self.config.verbose);
        self.evaluate_with(graph, &mut observer)
    }

    /// Cluster `graph`, reporting progress to `observer`
    pub fn evaluate_with<'g, O>(
        &self,
        graph: &'g WeightedGraph,
        observer: &mut O,
    ) -> Result<ClusteringOutcome<'g>>
    where
        O: LevelObserver + ?Sized,
    {
        self.config.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.parallelism)
            .build()?;

        let mut level_graph: Cow<'g, WeightedGraph> = Cow::Borrowed(graph);
        let mut node_to_community: Vec<usize> = (0..graph.node_count).collect();
        let mut modularity = Partition::new(graph, self.config.precision).modularity();
        let mut level = 0;

        loop {
            observer.level_started(&LevelStats {
                level,
                nodes: level_graph.node_count,
                edges: level_graph.edge_count(),
                total_weight: level_graph.total_weight(),
            });

            let (winner, improved, new_modularity, next_graph) = {
                let current: &WeightedGraph = &level_graph;
                let attempts: Vec<Attempt<'_>> = pool.install(|| {
                    (0..self.config.parallelism)
                        .into_par_iter()
                        .map(|attempt| self.run_attempt(current, level, attempt))
                        .collect()
                });

                let winner = best_attempt(&attempts);
                let best = &attempts[winner];
                compose_and_renumber(&mut node_to_community, best.partition.node_to_community());

                (
                    winner,
                    best.improved,
                    best.modularity,
                    best.partition.partition_to_graph(),
                )
            };

            observer.level_finished(&LevelReport {
                level,
                winner,
                modularity_before: modularity,
                modularity_after: new_modularity,
                improved,
            });

            level_graph = Cow::Owned(next_graph);
            modularity = new_modularity;
            level += 1;

            if !improved {
                break;
            }
        }

        observer.converged(level, modularity);

        Ok(ClusteringOutcome {
            communities: build_communities(&node_to_community, graph),
            node_to_community,
            modularity,
            levels: level,
        })
    }

    /// Local moving from singletons. Attempt 0 keeps index order, the others
    /// visit nodes in an order seeded by level and attempt.
    fn run_attempt<'a>(&self, graph: &'a WeightedGraph, level: usize, attempt: usize) -> Attempt<'a> {
        let mut partition =
            Partition::new(graph, self.config.precision).with_max_passes(self.config.max_passes);
        if attempt > 0 {
            let seed = self
                .config
                .seed
                .wrapping_add(((level as u64) << 32) | attempt as u64);
            partition = partition.with_shuffled_order(&mut StdRng::seed_from_u64(seed));
        }

        let improved = partition.one_level();
        let modularity = partition.modularity();
        log::trace!(
            "level {} attempt {}: improved={} modularity={:.6}",
            level,
            attempt,
            improved,
            modularity
        );

        Attempt {
            partition,
            modularity,
            improved,
        }
    }
}

/// Highest modularity wins; the first attempt seen keeps a tie
fn best_attempt(attempts: &[Attempt<'_>]) -> usize {
    let mut best = 0;
    for (i, attempt) in attempts.iter().enumerate().skip(1) {
        if attempt.modularity > attempts[best].modularity {
            best = i;
        }
    }
    best
}

/// Group original vertices by their final community id
fn build_communities<'g>(node_to_community: &[usize], graph: &'g WeightedGraph) -> Vec<Community<'g>> {
    let count = node_to_community.iter().max().map_or(0, |&max| max + 1);

    let mut communities: Vec<Community<'g>> =
        (0..count).map(|id| Community::new(id, graph)).collect();
    for (vertex, &comm) in node_to_community.iter().enumerate() {
        communities[comm].add(vertex);
    }

    communities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        started: Vec<LevelStats>,
        finished: Vec<LevelReport>,
        converged: Option<(usize, f64)>,
    }

    impl LevelObserver for Recorder {
        fn level_started(&mut self, stats: &LevelStats) {
            self.started.push(*stats);
        }

        fn level_finished(&mut self, report: &LevelReport) {
            self.finished.push(*report);
        }

        fn converged(&mut self, levels: usize, modularity: f64) {
            self.converged = Some((levels, modularity));
        }
    }

    fn attempt_with(graph: &WeightedGraph, modularity: f64) -> Attempt<'_> {
        Attempt {
            partition: Partition::new(graph, 0.01),
            modularity,
            improved: true,
        }
    }

    #[test]
    fn ties_go_to_the_lowest_attempt() {
        let g = WeightedGraph::edgeless(1);
        let attempts = vec![
            attempt_with(&g, 0.2),
            attempt_with(&g, 0.4),
            attempt_with(&g, 0.4),
            attempt_with(&g, 0.1),
        ];
        assert_eq!(best_attempt(&attempts), 1);
    }

    #[test]
    fn observer_sees_every_level() {
        let g = WeightedGraph::from_edges(
            6,
            [
                (0, 1, 1.0),
                (1, 2, 1.0),
                (0, 2, 1.0),
                (3, 4, 1.0),
                (4, 5, 1.0),
                (3, 5, 1.0),
            ],
        )
        .unwrap();

        let evaluator = LouvainEvaluator::new(LouvainConfig::default().with_parallelism(2));
        let mut recorder = Recorder::default();
        let outcome = evaluator.evaluate_with(&g, &mut recorder).unwrap();

        assert_eq!(outcome.levels, 2);
        assert_eq!(recorder.started.len(), 2);
        assert_eq!(recorder.started[0].nodes, 6);
        assert_eq!(recorder.started[0].edges, 6);
        assert_eq!(recorder.started[1].nodes, 2);
        assert!(recorder.finished[0].improved);
        assert!(!recorder.finished[1].improved);
        assert_eq!(recorder.converged.map(|(levels, _)| levels), Some(2));
        assert!((outcome.modularity - 0.5).abs() < 1e-12);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let g = WeightedGraph::edgeless(1);
        let evaluator = LouvainEvaluator::new(LouvainConfig::default().with_parallelism(0));
        assert!(evaluator.evaluate(&g).is_err());
    }
}
