//! Per-community summaries for the betweenness stage

use crate::cluster::metrics::{calculate_density, cut_weight};
use crate::cluster::profiles::{compute_border_profiles, equivalence_classes};
use crate::cluster::{ClusterSummary, ProfileClasses};
use crate::error::Result;
use crate::louvain::{ClusteringOutcome, Community};
use rayon::prelude::*;

/// Summarize one community, optionally grouping its members by border profile
pub fn summarize_community(community: &Community<'_>, with_profiles: bool) -> Result<ClusterSummary> {
    let border_vertices = community.border_vertices();

    let profile_classes = if with_profiles {
        let profiles = compute_border_profiles(community, &border_vertices)?;
        let members = community.members();
        let classes = equivalence_classes(&profiles)?
            .into_iter()
            .map(|class| class.into_iter().map(|local| members[local]).collect())
            .collect();
        Some(ProfileClasses {
            border_count: border_vertices.len(),
            classes,
        })
    } else {
        None
    };

    Ok(ClusterSummary {
        id: community.id(),
        members: community.members().to_vec(),
        size: community.len(),
        density: calculate_density(community),
        internal_weight: community.internal_weight(),
        cut_weight: cut_weight(community),
        border_vertices,
        profile_classes,
    })
}

/// Summarize every community with at least `min_cluster_size` members, largest first
pub fn summarize_communities(
    outcome: &ClusteringOutcome<'_>,
    min_cluster_size: usize,
    with_profiles: bool,
) -> Result<Vec<ClusterSummary>> {
    log::info!(
        "Summarizing {} communities (min size {}, profiles: {})",
        outcome.communities.len(),
        min_cluster_size,
        with_profiles
    );

    let mut summaries = outcome
        .communities
        .par_iter()
        .filter(|c| c.len() >= min_cluster_size)
        .map(|c| summarize_community(c, with_profiles))
        .collect::<Result<Vec<_>>>()?;

    // Sort clusters by size (largest first), id breaks ties
    summaries.sort_by(|a, b| b.size.cmp(&a.size).then(a.id.cmp(&b.id)));

    log::info!(
        "Kept {} clusters with {} or more members",
        summaries.len(),
        min_cluster_size
    );

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LouvainConfig;
    use crate::graph::WeightedGraph;
    use crate::louvain::LouvainEvaluator;

    #[test]
    fn disconnected_triangles_have_no_border() {
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
        let outcome = LouvainEvaluator::new(LouvainConfig::default().with_parallelism(1))
            .evaluate(&g)
            .unwrap();

        let summaries = summarize_communities(&outcome, 1, true).unwrap();
        assert_eq!(summaries.len(), 2);
        for s in &summaries {
            assert_eq!(s.size, 3);
            assert_eq!(s.density, 1.0);
            assert_eq!(s.internal_weight, 3.0);
            assert!(s.border_vertices.is_empty());
            let classes = s.profile_classes.as_ref().unwrap();
            assert_eq!(classes.border_count, 0);
            assert_eq!(classes.classes, vec![s.members.clone()]);
        }
    }

    #[test]
    fn small_clusters_are_filtered() {
        let g = WeightedGraph::edgeless(3);
        let outcome = LouvainEvaluator::new(LouvainConfig::default())
            .evaluate(&g)
            .unwrap();
        assert_eq!(summarize_communities(&outcome, 2, false).unwrap().len(), 0);
        assert_eq!(summarize_communities(&outcome, 1, false).unwrap().len(), 3);
    }
}
