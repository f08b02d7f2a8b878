//! Border-distance profiles of cluster members
//!
//! Shortest paths are taken inside the cluster only. Every border vertex is the
//! source of one Dijkstra run that records distances and shortest-path counts;
//! run `i` fills entry `i` of every member's profile.
//!
//! Path counting needs strictly positive weights inside the cluster: a
//! zero-weight edge ties two vertices at the same distance and makes the
//! number of shortest paths ill-defined.

use crate::error::{Error, Result};
use crate::graph::{induced_subgraph, WeightedGraph};
use crate::louvain::Community;
use crate::profile::BorderProfile;
use itertools::Itertools;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Profile type used for cluster members: path counts and weighted lengths
pub type VertexProfile = BorderProfile<u64, f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct State {
    cost: f64,
    node: usize,
}

impl Eq for State {}

impl Ord for State {
    // Reversed so the BinaryHeap pops the cheapest state
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source shortest path lengths and counts.
///
/// Every non-loop edge weight must be strictly positive, so each vertex is
/// settled after all of its shortest-path predecessors. Unreachable nodes keep
/// an infinite distance and a zero count. Counts saturate instead of
/// overflowing.
fn shortest_paths_with_counts(graph: &WeightedGraph, source: usize) -> (Vec<f64>, Vec<u64>) {
    let n = graph.node_count;
    let mut dist = vec![f64::INFINITY; n];
    let mut sigma = vec![0u64; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    sigma[source] = 1;
    heap.push(State {
        cost: 0.0,
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if settled[node] || cost > dist[node] {
            continue;
        }
        settled[node] = true;

        for (neighbor, weight) in graph.neighbors(node) {
            if neighbor == node || settled[neighbor] {
                continue;
            }
            let next = cost + weight;
            if next < dist[neighbor] {
                dist[neighbor] = next;
                sigma[neighbor] = sigma[node];
                heap.push(State {
                    cost: next,
                    node: neighbor,
                });
            } else if next == dist[neighbor] {
                sigma[neighbor] = sigma[neighbor].saturating_add(sigma[node]);
            }
        }
    }

    (dist, sigma)
}

/// One profile per member of `community`, in member order.
///
/// `border` lists border vertices by original id; entry `i` of every profile
/// refers to the i-th of them that is a member. Members a border vertex
/// cannot reach inside the cluster keep length 0 and count 0 for its entry.
pub fn compute_border_profiles(
    community: &Community<'_>,
    border: &[usize],
) -> Result<Vec<VertexProfile>> {
    let members = community.members();
    let sub = induced_subgraph(community.graph(), members);
    check_positive_weights(&sub.graph, &sub.local_to_global)?;

    let sources: Vec<usize> = border
        .iter()
        .filter_map(|b| members.binary_search(b).ok())
        .collect();

    let runs: Vec<(Vec<f64>, Vec<u64>)> = sources
        .par_iter()
        .map(|&source| shortest_paths_with_counts(&sub.graph, source))
        .collect();

    let mut profiles = vec![VertexProfile::new(runs.len()); members.len()];
    for (index, (dist, sigma)) in runs.iter().enumerate() {
        for (local, profile) in profiles.iter_mut().enumerate() {
            if dist[local].is_finite() {
                profile.set_length(index, dist[local])?;
                profile.set_count(index, sigma[local])?;
            }
        }
    }

    log::debug!(
        "cluster {}: {} profiles of width {}",
        community.id(),
        profiles.len(),
        runs.len()
    );

    Ok(profiles)
}

fn check_positive_weights(graph: &WeightedGraph, local_to_global: &[usize]) -> Result<()> {
    for node in 0..graph.node_count {
        if let Some((neighbor, weight)) = graph
            .neighbors(node)
            .find(|&(neighbor, weight)| neighbor != node && weight <= 0.0)
        {
            return Err(Error::InvalidWeight {
                source_node: local_to_global[node],
                target_node: local_to_global[neighbor],
                weight,
            });
        }
    }
    Ok(())
}

/// Group profile indices whose normalized profiles are equal.
///
/// Groups are sorted internally and ordered by their smallest index.
pub fn equivalence_classes(profiles: &[VertexProfile]) -> Result<Vec<Vec<usize>>> {
    let normalized = profiles
        .iter()
        .map(VertexProfile::normalized)
        .collect::<Result<Vec<_>>>()?;

    let order = (0..normalized.len()).sorted_by(|&a, &b| {
        normalized[a]
            .partial_cmp(&normalized[b])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut classes: Vec<Vec<usize>> = Vec::new();
    for index in order {
        match classes.last_mut() {
            Some(class) if normalized[class[0]] == normalized[index] => class.push(index),
            _ => classes.push(vec![index]),
        }
    }

    classes.sort_by_key(|class| class[0]);
    Ok(classes)
}
