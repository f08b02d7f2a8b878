use anyhow::Result;
use clap::Parser;
use fastbc::cluster::summarize_communities;
use fastbc::data::{load_weighted_edges, EdgeColumns};
use fastbc::{storage, Config, LouvainConfig, LouvainEvaluator};

#[derive(Parser, Debug)]
#[clap(
    name = "fastbc",
    about = "Multilevel community decomposition and border profiles for cluster-scoped betweenness"
)]
struct Cli {
    /// Path to input Parquet edge list
    #[clap(long)]
    input: String,

    /// Column holding edge sources
    #[clap(long, default_value = "src")]
    source_col: String,

    /// Column holding edge targets
    #[clap(long, default_value = "dst")]
    target_col: String,

    /// Column holding edge weights (unit weights when omitted)
    #[clap(long)]
    weight_col: Option<String>,

    /// Output directory for results
    #[clap(long, default_value = "fastbc_results")]
    output_dir: String,

    /// Independent Louvain attempts per level
    #[clap(long, default_value = "4")]
    parallelism: usize,

    /// Minimum modularity gain per local-moving pass
    #[clap(long, default_value = "0.01")]
    precision: f64,

    /// Seed for the node orders of attempts after the first
    #[clap(long, default_value = "0")]
    seed: u64,

    /// Maximum local-moving passes per attempt (unbounded when omitted)
    #[clap(long)]
    max_passes: Option<usize>,

    /// Minimum cluster size kept in the output
    #[clap(long, default_value = "1")]
    min_cluster_size: usize,

    /// Compute border profiles and group interchangeable vertices
    #[clap(long)]
    profiles: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let louvain = LouvainConfig::default()
            .with_precision(self.precision)
            .with_parallelism(self.parallelism)
            .with_seed(self.seed)
            .with_max_passes(self.max_passes)
            .with_verbose(self.verbose);
        Config::new(louvain, self.min_cluster_size, self.profiles)
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // If threads = 0, use all available cores
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = args.config();
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);
    log::debug!("Configuration: {:?}", config);

    // 1. Load data
    let columns = EdgeColumns {
        source: args.source_col.clone(),
        target: args.target_col.clone(),
        weight: args.weight_col.clone(),
    };
    let (graph, labels) = load_weighted_edges(&args.input, &columns)?;

    // 2. Find communities
    let evaluator = LouvainEvaluator::new(config.louvain.clone());
    let outcome = evaluator.evaluate(&graph)?;

    log::info!(
        "Found {} communities with modularity {:.6}",
        outcome.communities.len(),
        outcome.modularity
    );

    // 3. Describe clusters and their borders
    let summaries =
        summarize_communities(&outcome, config.min_cluster_size, config.compute_profiles)?;

    // 4. Save results
    storage::save_results(&outcome, &summaries, &graph, &labels, &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
