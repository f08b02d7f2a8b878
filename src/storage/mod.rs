//! Results persistence module

use crate::cluster::ClusterSummary;
use crate::graph::WeightedGraph;
use crate::louvain::ClusteringOutcome;
use anyhow::Result;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Save analysis results to the specified directory
pub fn save_results(
    outcome: &ClusteringOutcome<'_>,
    summaries: &[ClusterSummary],
    graph: &WeightedGraph,
    labels: &[String],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} clusters to {}", summaries.len(), output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(outcome, summaries, graph, output_dir)?;
    save_assignment(outcome, labels, output_dir)?;
    save_clusters(summaries, labels, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save run-level statistics
fn save_summary(
    outcome: &ClusteringOutcome<'_>,
    summaries: &[ClusterSummary],
    graph: &WeightedGraph,
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let border_total: usize = summaries.iter().map(|c| c.border_vertices.len()).sum();
    let class_total: usize = summaries
        .iter()
        .filter_map(|c| c.profile_classes.as_ref())
        .map(|p| p.classes.len())
        .sum();

    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count,
            "edge_count": graph.edge_count(),
            "total_weight": graph.total_weight(),
        },
        "clustering": {
            "levels": outcome.levels,
            "modularity": outcome.modularity,
            "community_count": outcome.communities.len(),
        },
        "cluster_stats": {
            "cluster_count": summaries.len(),
            "largest_cluster_size": summaries.first().map_or(0, |c| c.size),
            "smallest_cluster_size": summaries.last().map_or(0, |c| c.size),
            "border_vertex_count": border_total,
            "profile_class_count": class_total,
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save the community of every labelled vertex
fn save_assignment(
    outcome: &ClusteringOutcome<'_>,
    labels: &[String],
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join("communities.json");
    let mut file = File::create(path)?;

    let assignment: serde_json::Map<String, serde_json::Value> = outcome
        .node_to_community
        .iter()
        .enumerate()
        .map(|(vertex, &comm)| (label(labels, vertex), json!(comm)))
        .collect();

    file.write_all(to_string_pretty(&assignment)?.as_bytes())?;

    Ok(())
}

/// Save every kept cluster with labels resolved
fn save_clusters(summaries: &[ClusterSummary], labels: &[String], output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("clusters.json");
    let mut file = File::create(path)?;

    let resolve = |ids: &[usize]| ids.iter().map(|&v| label(labels, v)).collect::<Vec<_>>();

    let clusters_json = json!({
        "clusters": summaries.iter().map(|c| {
            json!({
                "id": c.id,
                "size": c.size,
                "density": c.density,
                "internal_weight": c.internal_weight,
                "cut_weight": c.cut_weight,
                "members": resolve(c.members.as_slice()),
                "border_vertices": resolve(c.border_vertices.as_slice()),
                "profile_classes": c.profile_classes.as_ref().map(|p| json!({
                    "border_count": p.border_count,
                    "classes": p.classes.iter().map(|class| resolve(class.as_slice())).collect::<Vec<_>>(),
                })),
            })
        }).collect::<Vec<_>>()
    });

    file.write_all(to_string_pretty(&clusters_json)?.as_bytes())?;

    Ok(())
}

fn label(labels: &[String], vertex: usize) -> String {
    labels
        .get(vertex)
        .cloned()
        .unwrap_or_else(|| vertex.to_string())
}
