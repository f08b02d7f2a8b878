//! Memory-efficient weighted undirected graph

use crate::error::{Error, Result};
use petgraph::graph::{IndexType, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::mem;

/// Compressed sparse representation of an undirected weighted graph.
///
/// Every edge `{u, v}` with `u != v` is stored in both adjacency lists; a
/// self-loop is stored once in its node's list. Weighted degrees therefore
/// count a self-loop once, and the total weight is the sum of all weighted
/// degrees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// offsets[i] to offsets[i+1] defines the adjacency range for node i
    pub offsets: Vec<u32>,

    /// Concatenated neighbor lists, sorted per node
    pub neighbors: Vec<u32>,

    /// Edge weight parallel to `neighbors`
    pub weights: Vec<f64>,

    /// Sum of all weighted degrees
    total_weight: f64,
}

impl WeightedGraph {
    /// Graph with `node_count` nodes and no edges
    pub fn edgeless(node_count: usize) -> Self {
        Self {
            node_count,
            offsets: vec![0; node_count + 1],
            neighbors: Vec::new(),
            weights: Vec::new(),
            total_weight: 0.0,
        }
    }

    /// Build from per-node adjacency maps. Each map must already hold both
    /// directions of every undirected edge.
    pub(crate) fn from_adjacency(adjacency: Vec<BTreeMap<u32, f64>>) -> Self {
        let node_count = adjacency.len();
        let arc_count: usize = adjacency.iter().map(BTreeMap::len).sum();

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut neighbors = Vec::with_capacity(arc_count);
        let mut weights = Vec::with_capacity(arc_count);
        let mut total_weight = 0.0;

        offsets.push(0);
        for list in adjacency {
            for (target, weight) in list {
                neighbors.push(target);
                weights.push(weight);
                total_weight += weight;
            }
            offsets.push(neighbors.len() as u32);
        }

        Self {
            node_count,
            offsets,
            neighbors,
            weights,
            total_weight,
        }
    }

    /// Build from an undirected edge list. Parallel edges are merged by
    /// summing their weights.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut adjacency: Vec<BTreeMap<u32, f64>> = vec![BTreeMap::new(); node_count];

        for (src, dst, weight) in edges {
            for node in [src, dst] {
                if node >= node_count {
                    return Err(Error::NodeOutOfRange { node, node_count });
                }
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidWeight {
                    source_node: src,
                    target_node: dst,
                    weight,
                });
            }

            *adjacency[src].entry(dst as u32).or_insert(0.0) += weight;
            if src != dst {
                *adjacency[dst].entry(src as u32).or_insert(0.0) += weight;
            }
        }

        Ok(Self::from_adjacency(adjacency))
    }

    /// Convert a petgraph undirected graph, taking edge weights through `Into<f64>`
    pub fn from_petgraph<N, E, Ix>(graph: &UnGraph<N, E, Ix>) -> Result<Self>
    where
        E: Copy + Into<f64>,
        Ix: IndexType,
    {
        Self::from_edges(
            graph.node_count(),
            graph
                .edge_references()
                .map(|e| (e.source().index(), e.target().index(), (*e.weight()).into())),
        )
    }

    /// Neighbors of a node with the weight of the connecting edge
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.range(node);
        self.neighbors[range.clone()]
            .iter()
            .map(|&n| n as usize)
            .zip(self.weights[range].iter().copied())
    }

    /// Number of adjacency entries of a node
    pub fn degree(&self, node: usize) -> usize {
        self.range(node).len()
    }

    /// Sum of the weights of a node's adjacency entries
    pub fn weighted_degree(&self, node: usize) -> f64 {
        self.weights[self.range(node)].iter().sum()
    }

    /// Weight of the self-loop on `node`, zero when there is none
    pub fn self_loop_weight(&self, node: usize) -> f64 {
        let range = self.range(node);
        match self.neighbors[range.clone()].binary_search(&(node as u32)) {
            Ok(pos) => self.weights[range.start + pos],
            Err(_) => 0.0,
        }
    }

    /// Check if there's an edge between src and dst
    pub fn has_edge(&self, src: usize, dst: usize) -> bool {
        self.neighbors[self.range(src)]
            .binary_search(&(dst as u32))
            .is_ok()
    }

    /// Number of stored adjacency entries (both directions of each edge)
    pub fn arc_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of undirected edges, self-loops counted once
    pub fn edge_count(&self) -> usize {
        let self_loops = (0..self.node_count)
            .filter(|&n| self.has_edge(n, n))
            .count();
        (self.arc_count() - self_loops) / 2 + self_loops
    }

    /// Sum of all weighted degrees
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let neighbors = self.neighbors.capacity() * mem::size_of::<u32>();
        let weights = self.weights.capacity() * mem::size_of::<f64>();

        base + offsets + neighbors + weights
    }

    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize..self.offsets[node + 1] as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_both_directions_and_self_loops_once() {
        let g = WeightedGraph::from_edges(3, [(0, 1, 2.0), (1, 1, 3.0), (1, 2, 1.0)]).unwrap();
        assert_eq!(g.arc_count(), 5);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.weighted_degree(1), 6.0);
        assert_eq!(g.self_loop_weight(1), 3.0);
        assert_eq!(g.self_loop_weight(0), 0.0);
        assert_eq!(g.total_weight(), 9.0);
        assert!(g.has_edge(2, 1));
    }

    #[test]
    fn parallel_edges_are_merged() {
        let g = WeightedGraph::from_edges(2, [(0, 1, 1.0), (1, 0, 0.5)]).unwrap();
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![(1, 1.5)]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn rejects_bad_edges() {
        assert!(matches!(
            WeightedGraph::from_edges(2, [(0, 2, 1.0)]),
            Err(Error::NodeOutOfRange { node: 2, .. })
        ));
        assert!(matches!(
            WeightedGraph::from_edges(2, [(0, 1, -1.0)]),
            Err(Error::InvalidWeight { .. })
        ));
        assert!(WeightedGraph::from_edges(2, [(0, 1, f64::NAN)]).is_err());
    }

    #[test]
    fn converts_from_petgraph() {
        let mut pg = UnGraph::<(), f32>::new_undirected();
        let a = pg.add_node(());
        let b = pg.add_node(());
        let c = pg.add_node(());
        pg.add_edge(a, b, 1.0);
        pg.add_edge(b, c, 2.0);

        let g = WeightedGraph::from_petgraph(&pg).unwrap();
        assert_eq!(g.node_count, 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.weighted_degree(1), 3.0);
    }

    #[test]
    fn edgeless_graph_has_zero_weight() {
        let g = WeightedGraph::edgeless(4);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.total_weight(), 0.0);
        assert_eq!(g.degree(3), 0);
    }
}
