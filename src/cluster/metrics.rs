//! Cluster statistics and metrics

use crate::louvain::Community;

/// Density (internal edges / potential edges) of an undirected community.
/// Self-loops are not counted.
pub fn calculate_density(community: &Community<'_>) -> f32 {
    let n = community.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    let potential_edges = n * (n - 1) / 2;

    let graph = community.graph();
    let actual_edges: usize = community
        .members()
        .iter()
        .map(|&v| {
            graph
                .neighbors(v)
                .filter(|&(u, _)| u > v && community.contains(u))
                .count()
        })
        .sum();

    actual_edges as f32 / potential_edges as f32
}

/// Weight of the edges with exactly one endpoint in the community
pub fn cut_weight(community: &Community<'_>) -> f64 {
    let graph = community.graph();
    community
        .members()
        .iter()
        .flat_map(|&v| graph.neighbors(v))
        .filter(|&(n, _)| !community.contains(n))
        .map(|(_, w)| w)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightedGraph;

    #[test]
    fn density_and_cut_of_bridged_triangle() {
        // Path 0-1-2 inside, vertex 2 bridged to 3
        let g =
            WeightedGraph::from_edges(4, [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 2.5), (0, 0, 1.0)])
                .unwrap();
        let mut c = Community::new(0, &g);
        for v in 0..3 {
            c.add(v);
        }

        assert!((calculate_density(&c) - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(cut_weight(&c), 2.5);
    }

    #[test]
    fn singleton_density_is_one() {
        let g = WeightedGraph::edgeless(1);
        let mut c = Community::new(0, &g);
        c.add(0);
        assert_eq!(calculate_density(&c), 1.0);
        assert_eq!(cut_weight(&c), 0.0);
    }
}
