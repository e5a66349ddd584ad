//! Exhaustive election checker CLI
//!
//! Runs the checker against the built-in vote-counting node model and
//! prints the final report, human-readable by default or as JSON.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ballot_sweep::{model, run_sweep, seed_queue, SweepConfig};

#[derive(Parser)]
#[command(name = "ballot-sweep")]
#[command(about = "Exhaustive model checker for the election protocol", long_about = None)]
struct Cli {
    /// Number of federated (leader) nodes
    #[arg(long, default_value_t = 4)]
    feds: usize,

    /// Number of auditor (volunteer) candidates
    #[arg(long, default_value_t = 5)]
    auds: usize,

    /// Depth bound for the search
    #[arg(long, default_value_t = 90)]
    depth_limit: usize,

    /// Depth past which mirror deduplication starts
    #[arg(long, default_value_t = 4)]
    mirror_warmup: usize,

    /// Checkpoint depth for loop-vs-failure classification
    #[arg(long, default_value_t = 9)]
    loop_check_depth: usize,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = SweepConfig {
        federated: cli.feds,
        auditors: cli.auds,
        depth_limit: cli.depth_limit,
        mirror_warmup: cli.mirror_warmup,
        loop_check_depth: cli.loop_check_depth,
    };

    let nodes = model::make_nodes(config.federated);
    let seed = seed_queue(config.federated, model::volunteer_announcements(config.auditors));

    let report = run_sweep(&config, nodes, seed)?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}
