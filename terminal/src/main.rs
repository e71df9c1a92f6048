use anyhow::Result;
use clap::Parser;
use std::io;

use terminal::config::{Args, RunConfig};
use terminal::runner;

fn main() -> Result<()> {
    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = RunConfig::from_args(Args::parse())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = runner::run(&config, &mut out)?;

    tracing::info!(
        "Finished after {} tick(s): {} food eaten, {} snake(s) alive",
        summary.ticks,
        summary.food_eaten,
        summary.alive
    );

    Ok(())
}
