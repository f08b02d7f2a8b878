//! Parquet file handling for weighted edge lists

use crate::graph::{GraphBuilder, WeightedGraph};
use anyhow::Result;
use polars::prelude::*;

/// Column names of an edge-list file
#[derive(Debug, Clone)]
pub struct EdgeColumns {
    pub source: String,
    pub target: String,

    /// Weight column; every edge weighs 1.0 when absent
    pub weight: Option<String>,
}

impl Default for EdgeColumns {
    fn default() -> Self {
        Self {
            source: "src".to_string(),
            target: "dst".to_string(),
            weight: None,
        }
    }
}

/// Load an undirected weighted graph from a Parquet edge list.
///
/// Endpoint columns may hold strings or integers; they become node labels in
/// order of first appearance. Rows with a null endpoint or weight are skipped.
pub fn load_weighted_edges(
    path: &str,
    columns: &EdgeColumns,
) -> Result<(WeightedGraph, Vec<String>)> {
    log::info!("Reading parquet file: {}", path);

    if !std::path::Path::new(path).exists() {
        return Err(anyhow::anyhow!("File not found: {}", path));
    }

    let mut selection = vec![
        col(columns.source.as_str()),
        col(columns.target.as_str()),
    ];
    if let Some(weight) = &columns.weight {
        selection.push(col(weight.as_str()));
    }

    let df = LazyFrame::scan_parquet(path, Default::default())?
        .select(selection)
        .collect()?;

    log::info!("File schema: {:?}", df.schema());
    log::info!("Loaded {} edge rows", df.height());

    let src_col = df.column(&columns.source)?.cast(&DataType::String)?;
    let dst_col = df.column(&columns.target)?.cast(&DataType::String)?;
    let src_col = src_col.str()?;
    let dst_col = dst_col.str()?;

    let weight_col = match &columns.weight {
        Some(name) => Some(df.column(name)?.cast(&DataType::Float64)?),
        None => None,
    };
    let weights = weight_col.as_ref().map(|c| c.f64()).transpose()?;

    let row_count = df.height();
    let mut builder = GraphBuilder::with_capacity(row_count);
    let mut skipped = 0usize;

    for i in 0..row_count {
        let (Some(src), Some(dst)) = (src_col.get(i), dst_col.get(i)) else {
            skipped += 1;
            continue;
        };
        let weight = match weights {
            Some(w) => match w.get(i) {
                Some(w) => w,
                None => {
                    skipped += 1;
                    continue;
                }
            },
            None => 1.0,
        };

        builder.add_edge(src, dst, weight)?;
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows with null values", skipped);
    }

    let (graph, labels) = builder.build();
    log::info!(
        "Built graph with {} nodes, {} edges, total weight {}",
        graph.node_count,
        graph.edge_count(),
        graph.total_weight()
    );

    Ok((graph, labels))
}
