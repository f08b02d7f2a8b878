//! Graph construction module

use crate::error::{Error, Result};
use crate::graph::WeightedGraph;
use std::collections::{BTreeMap, HashMap};

/// Builder for incrementally constructing a WeightedGraph from labelled edges
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs, indexed by node
    node_ids: Vec<String>,

    /// Weighted adjacency for each node, both directions
    adjacency: Vec<BTreeMap<u32, f64>>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency: Vec::with_capacity(capacity),
        }
    }

    /// Get or create a node index for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency.push(BTreeMap::new());

        idx
    }

    /// Add an undirected weighted edge. Repeated edges accumulate weight.
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str, weight: f64) -> Result<()> {
        let src = self.get_or_create_node(src_id);
        let dst = self.get_or_create_node(dst_id);

        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight {
                source_node: src as usize,
                target_node: dst as usize,
                weight,
            });
        }

        *self.adjacency[src as usize].entry(dst).or_insert(0.0) += weight;
        if src != dst {
            *self.adjacency[dst as usize].entry(src).or_insert(0.0) += weight;
        }

        Ok(())
    }

    /// Number of distinct nodes seen so far
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Build the graph together with the node labels, indexed by node
    pub fn build(self) -> (WeightedGraph, Vec<String>) {
        (WeightedGraph::from_adjacency(self.adjacency), self.node_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_first_appearance() {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge("carol", "alice", 1.0).unwrap();
        builder.add_edge("alice", "bob", 2.0).unwrap();
        builder.add_edge("bob", "alice", 1.0).unwrap();

        let (graph, ids) = builder.build();
        assert_eq!(ids, vec!["carol", "alice", "bob"]);
        assert_eq!(graph.node_count, 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weighted_degree(1), 4.0);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut builder = GraphBuilder::default();
        assert!(builder.add_edge("a", "b", -0.5).is_err());
    }
}
