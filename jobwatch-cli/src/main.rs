//! Jobwatch CLI
//!
//! Command-line interface for submitting files to the job service and
//! following a job until its result is available.

mod commands;
mod config;
mod presenter;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jobwatch")]
#[command(about = "Submit files to a job service and watch them finish", long_about = None)]
struct Cli {
    /// Job service URL
    #[arg(long, env = "JOBWATCH_SERVER_URL", default_value = config::DEFAULT_SERVER_URL)]
    server_url: String,

    /// Delay between two status checks, in milliseconds
    #[arg(long, env = "JOBWATCH_POLL_INTERVAL_MS", default_value_t = 1200)]
    interval_ms: u64,

    /// Give up on a single request after this many milliseconds
    #[arg(long, env = "JOBWATCH_REQUEST_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so they never mix with job output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::load(cli.server_url, cli.interval_ms, cli.timeout_ms)?;

    handle_command(cli.command, &config).await
}
