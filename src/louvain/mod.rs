//! Multilevel Louvain community detection
//!
//! Each level runs several independent local-moving attempts over the same
//! level graph, keeps the attempt with the highest modularity, collapses its
//! communities into the next level graph and refines the assignment of the
//! original vertices. The first level whose best attempt moves no node ends
//! the run.

pub mod community;
pub mod evaluator;
pub mod observer;
pub mod partition;

pub use community::Community;
pub use evaluator::{ClusteringOutcome, LouvainEvaluator};
pub use observer::{LevelObserver, LevelReport, LevelStats, LogObserver, NoopObserver};
pub use partition::Partition;

/// Dense zero-based ids for the communities that have at least one member.
///
/// Returns the old-id → new-id table (unused ids map to `usize::MAX`) and the
/// number of surviving communities. Surviving ids keep their ascending order.
/// Community ids must be smaller than `assignment.len()`.
pub(crate) fn dense_renumbering(assignment: &[usize]) -> (Vec<usize>, usize) {
    let mut used = vec![false; assignment.len()];
    for &comm in assignment {
        used[comm] = true;
    }

    let mut renumber = vec![usize::MAX; assignment.len()];
    let mut next = 0;
    for (comm, _) in used.iter().enumerate().filter(|(_, &u)| u) {
        renumber[comm] = next;
        next += 1;
    }

    (renumber, next)
}

/// Push the level winner's assignment through the input-vertex mapping.
///
/// `node_to_community[v]` holds the level-graph node of original vertex `v`;
/// afterwards it holds that node's community, densely renumbered, which is
/// also the node id in the next level graph.
pub(crate) fn compose_and_renumber(node_to_community: &mut [usize], level_assignment: &[usize]) {
    let (renumber, _) = dense_renumbering(level_assignment);
    for comm in node_to_community.iter_mut() {
        *comm = renumber[level_assignment[*comm]];
    }
}
