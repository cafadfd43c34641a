//! Binary crate for the `weather-dashboard` terminal front end.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and config overrides
//! - Interactive search and preset selection
//! - Rendering dashboard snapshots as text

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod dashboard;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the redrawn dashboard.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
