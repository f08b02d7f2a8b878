//! One level of Louvain local moving over a weighted graph

use super::dense_renumbering;
use crate::graph::WeightedGraph;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Community assignment of one level graph under local modularity optimization.
///
/// Starts with every node in its own community. `tot[c]` is the sum of the
/// weighted degrees of the members of `c`, `inside[c]` the weight of the edges
/// inside `c` (internal edges counted from both ends, self-loops once).
#[derive(Debug, Clone)]
pub struct Partition<'g> {
    graph: &'g WeightedGraph,
    precision: f64,
    max_passes: Option<usize>,
    order: Vec<usize>,
    n2c: Vec<usize>,
    tot: Vec<f64>,
    inside: Vec<f64>,

    // Scratch for gathering neighbor communities; -1 marks an unseen community
    neigh_weight: Vec<f64>,
    neigh_pos: Vec<usize>,
}

impl<'g> Partition<'g> {
    /// Singleton partition of `graph`. A pass that gains no more than
    /// `precision` modularity ends the level.
    pub fn new(graph: &'g WeightedGraph, precision: f64) -> Self {
        let n = graph.node_count;
        Self {
            graph,
            precision,
            max_passes: None,
            order: (0..n).collect(),
            n2c: (0..n).collect(),
            tot: (0..n).map(|node| graph.weighted_degree(node)).collect(),
            inside: (0..n).map(|node| graph.self_loop_weight(node)).collect(),
            neigh_weight: vec![-1.0; n],
            neigh_pos: Vec::new(),
        }
    }

    /// Stop local moving after this many passes even if modularity still improves
    pub fn with_max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Visit nodes in a random order instead of index order
    pub fn with_shuffled_order<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.order.shuffle(rng);
        self
    }

    /// Current community of every node of the level graph
    pub fn node_to_community(&self) -> &[usize] {
        &self.n2c
    }

    /// Newman modularity of the current assignment, zero for an edgeless graph
    pub fn modularity(&self) -> f64 {
        let m2 = self.graph.total_weight();
        if m2 <= 0.0 {
            return 0.0;
        }

        self.tot
            .iter()
            .zip(&self.inside)
            .filter(|(&tot, _)| tot > 0.0)
            .map(|(&tot, &inside)| inside / m2 - (tot / m2) * (tot / m2))
            .sum()
    }

    /// Move nodes between neighboring communities until a pass stops paying off.
    ///
    /// Returns whether any node changed community.
    pub fn one_level(&mut self) -> bool {
        let graph = self.graph;
        let m2 = graph.total_weight();
        if m2 <= 0.0 {
            return false;
        }

        let mut improvement = false;
        let mut new_mod = self.modularity();
        let mut passes = 0;

        loop {
            let cur_mod = new_mod;
            let mut moves = 0;
            passes += 1;

            for idx in 0..self.order.len() {
                let node = self.order[idx];
                let node_comm = self.n2c[node];
                let w_degree = graph.weighted_degree(node);

                self.gather_neighbor_communities(node);
                let own_links = self.neigh_weight[node_comm];
                self.remove(node, node_comm, own_links);

                let mut best_comm = node_comm;
                let mut best_links = own_links;
                let mut best_increase = 0.0;
                for &comm in &self.neigh_pos {
                    let links = self.neigh_weight[comm];
                    let increase = links - self.tot[comm] * w_degree / m2;
                    if increase > best_increase {
                        best_comm = comm;
                        best_links = links;
                        best_increase = increase;
                    }
                }

                self.insert(node, best_comm, best_links);
                if best_comm != node_comm {
                    moves += 1;
                }
            }

            new_mod = self.modularity();
            if moves > 0 {
                improvement = true;
            }

            log::trace!(
                "pass {}: {} moves, modularity {:.6} -> {:.6}",
                passes,
                moves,
                cur_mod,
                new_mod
            );

            let exhausted = self.max_passes.map_or(false, |max| passes >= max);
            if moves == 0 || new_mod - cur_mod <= self.precision || exhausted {
                break;
            }
        }

        improvement
    }

    /// Collapse every community into one node. Communities are numbered densely
    /// in ascending id order; intra-community weight becomes a self-loop.
    pub fn partition_to_graph(&self) -> WeightedGraph {
        let (renumber, community_count) = dense_renumbering(&self.n2c);

        let mut adjacency: Vec<BTreeMap<u32, f64>> = vec![BTreeMap::new(); community_count];
        for (node, &comm) in self.n2c.iter().enumerate() {
            let from = renumber[comm];
            for (neighbor, weight) in self.graph.neighbors(node) {
                let to = renumber[self.n2c[neighbor]] as u32;
                *adjacency[from].entry(to).or_insert(0.0) += weight;
            }
        }

        WeightedGraph::from_adjacency(adjacency)
    }

    /// Collect the communities adjacent to `node` with the link weight towards
    /// each. The node's own community always comes first.
    fn gather_neighbor_communities(&mut self, node: usize) {
        for &comm in &self.neigh_pos {
            self.neigh_weight[comm] = -1.0;
        }
        self.neigh_pos.clear();

        let own = self.n2c[node];
        self.neigh_weight[own] = 0.0;
        self.neigh_pos.push(own);

        for (neighbor, weight) in self.graph.neighbors(node) {
            if neighbor == node {
                continue;
            }
            let comm = self.n2c[neighbor];
            if self.neigh_weight[comm] < 0.0 {
                self.neigh_weight[comm] = 0.0;
                self.neigh_pos.push(comm);
            }
            self.neigh_weight[comm] += weight;
        }
    }

    fn remove(&mut self, node: usize, comm: usize, links: f64) {
        self.tot[comm] -= self.graph.weighted_degree(node);
        self.inside[comm] -= 2.0 * links + self.graph.self_loop_weight(node);
    }

    fn insert(&mut self, node: usize, comm: usize, links: f64) {
        self.tot[comm] += self.graph.weighted_degree(node);
        self.inside[comm] += 2.0 * links + self.graph.self_loop_weight(node);
        self.n2c[node] = comm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_triangles() -> WeightedGraph {
        WeightedGraph::from_edges(
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
        .unwrap()
    }

    #[test]
    fn singleton_modularity_of_triangles() {
        let g = two_triangles();
        let p = Partition::new(&g, 0.01);
        // Each node: tot = 2, m2 = 12, inside = 0
        let expected = -6.0 * (2.0f64 / 12.0).powi(2);
        assert!((p.modularity() - expected).abs() < 1e-12);
    }

    #[test]
    fn one_level_merges_each_triangle() {
        let g = two_triangles();
        let mut p = Partition::new(&g, 0.01);
        assert!(p.one_level());

        let n2c = p.node_to_community();
        assert_eq!(n2c[0], n2c[1]);
        assert_eq!(n2c[1], n2c[2]);
        assert_eq!(n2c[3], n2c[4]);
        assert_eq!(n2c[4], n2c[5]);
        assert_ne!(n2c[0], n2c[3]);
        assert!((p.modularity() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn shuffled_order_finds_the_same_split() {
        let g = two_triangles();
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = Partition::new(&g, 0.01).with_shuffled_order(&mut rng);
        assert!(p.one_level());
        assert!((p.modularity() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn aggregation_preserves_total_weight() {
        let g = two_triangles();
        let mut p = Partition::new(&g, 0.01);
        p.one_level();

        let coarse = p.partition_to_graph();
        assert_eq!(coarse.node_count, 2);
        assert_eq!(coarse.total_weight(), g.total_weight());
        assert_eq!(coarse.self_loop_weight(0), 6.0);
        assert_eq!(coarse.self_loop_weight(1), 6.0);
        assert!(!coarse.has_edge(0, 1));

        // Modularity is unchanged by aggregation
        let lifted = Partition::new(&coarse, 0.01);
        assert!((lifted.modularity() - p.modularity()).abs() < 1e-12);
    }

    #[test]
    fn edgeless_graph_never_improves() {
        let g = WeightedGraph::edgeless(3);
        let mut p = Partition::new(&g, 0.01);
        assert!(!p.one_level());
        assert_eq!(p.modularity(), 0.0);
        assert_eq!(p.node_to_community(), &[0, 1, 2]);
    }

    #[test]
    fn max_passes_bounds_local_moving() {
        let g = two_triangles();
        let mut p = Partition::new(&g, 0.0).with_max_passes(Some(1));
        assert!(p.one_level());
    }
}
