//! Induced subgraph extraction

use crate::graph::WeightedGraph;
use std::collections::BTreeMap;

/// Subgraph induced by a node set, with the mapping back to the parent graph
#[derive(Debug, Clone)]
pub struct Subgraph {
    pub graph: WeightedGraph,

    /// local_to_global[i] is the parent node of local node i
    pub local_to_global: Vec<usize>,
}

/// Extract the subgraph induced by `members`.
///
/// Local node `i` corresponds to `members[i]`; only edges with both endpoints
/// among the members are kept.
pub fn induced_subgraph(graph: &WeightedGraph, members: &[usize]) -> Subgraph {
    let mut global_to_local = vec![u32::MAX; graph.node_count];
    for (local, &global) in members.iter().enumerate() {
        global_to_local[global] = local as u32;
    }

    let adjacency = members
        .iter()
        .map(|&node| {
            graph
                .neighbors(node)
                .filter(|&(target, _)| global_to_local[target] != u32::MAX)
                .map(|(target, weight)| (global_to_local[target], weight))
                .collect::<BTreeMap<u32, f64>>()
        })
        .collect();

    Subgraph {
        graph: WeightedGraph::from_adjacency(adjacency),
        local_to_global: members.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_internal_edges() {
        // Path 0 - 1 - 2 - 3
        let g = WeightedGraph::from_edges(4, [(0, 1, 1.0), (1, 2, 2.0), (2, 3, 3.0)]).unwrap();
        let sub = induced_subgraph(&g, &[2, 1]);

        assert_eq!(sub.graph.node_count, 2);
        assert_eq!(sub.local_to_global, vec![2, 1]);
        assert_eq!(sub.graph.edge_count(), 1);
        assert_eq!(sub.graph.neighbors(0).collect::<Vec<_>>(), vec![(1, 2.0)]);
    }
}
