use anyhow::{Context, Result};
use clap::Parser;
use oblivious_knapsack_auction::cli_utils::Args;
use oblivious_knapsack_auction::runner::run;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(?args, "arguments parsed");

    run(args).with_context(|| "Failed to run the allocation.")?;

    Ok(())
}
