//! Community membership over the input graph

use crate::graph::WeightedGraph;

/// Original vertices assigned to one community, borrowing the graph they live in
#[derive(Debug, Clone)]
pub struct Community<'g> {
    id: usize,
    graph: &'g WeightedGraph,
    members: Vec<usize>,
}

impl<'g> Community<'g> {
    pub fn new(id: usize, graph: &'g WeightedGraph) -> Self {
        Self {
            id,
            graph,
            members: Vec::new(),
        }
    }

    /// Add a vertex, keeping members sorted. Adding a member twice is a no-op.
    pub fn add(&mut self, vertex: usize) {
        match self.members.last() {
            Some(&last) if last >= vertex => {
                if let Err(pos) = self.members.binary_search(&vertex) {
                    self.members.insert(pos, vertex);
                }
            }
            _ => self.members.push(vertex),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn graph(&self) -> &'g WeightedGraph {
        self.graph
    }

    /// Member vertices in ascending order
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.members.binary_search(&vertex).is_ok()
    }

    /// Members with at least one edge leaving the community
    pub fn border_vertices(&self) -> Vec<usize> {
        self.members
            .iter()
            .copied()
            .filter(|&v| self.graph.neighbors(v).any(|(n, _)| !self.contains(n)))
            .collect()
    }

    /// Weight of the edges with both endpoints inside, each edge counted once
    pub fn internal_weight(&self) -> f64 {
        self.members
            .iter()
            .flat_map(|&v| {
                self.graph
                    .neighbors(v)
                    .filter(move |&(n, _)| n >= v && self.contains(n))
                    .map(|(_, w)| w)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_and_internal_weight() {
        // Triangle 0-1-2 bridged to 3 through vertex 2
        let g = WeightedGraph::from_edges(
            4,
            [(0, 1, 1.0), (1, 2, 1.0), (0, 2, 2.0), (2, 3, 5.0), (1, 1, 0.5)],
        )
        .unwrap();

        let mut c = Community::new(0, &g);
        for v in 0..3 {
            c.add(v);
        }

        assert_eq!(c.len(), 3);
        assert!(c.contains(2));
        assert!(!c.contains(3));
        assert_eq!(c.border_vertices(), vec![2]);
        assert_eq!(c.internal_weight(), 4.5);
    }

    #[test]
    fn out_of_order_adds_stay_sorted() {
        let g = WeightedGraph::from_edges(5, [(0, 1, 1.0), (1, 4, 1.0), (3, 4, 2.0)]).unwrap();
        let mut c = Community::new(0, &g);
        for v in [4, 1, 3, 1, 0] {
            c.add(v);
        }

        assert_eq!(c.members(), &[0, 1, 3, 4]);
        assert!(c.contains(3));
        assert!(!c.contains(2));
        assert!(c.border_vertices().is_empty());
        assert_eq!(c.internal_weight(), 4.0);
    }

    #[test]
    fn isolated_community_has_no_border() {
        let g = WeightedGraph::from_edges(2, [(0, 1, 1.0)]).unwrap();
        let mut c = Community::new(0, &g);
        c.add(0);
        c.add(1);
        assert!(c.border_vertices().is_empty());
    }
}
