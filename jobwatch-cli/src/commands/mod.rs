//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;

use anyhow::Result;
use clap::Subcommand;
use jobwatch_poller::Config;
use std::path::PathBuf;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a file and follow the job until it finishes
    Submit {
        /// File to upload
        path: PathBuf,
    },
    /// Follow an existing job until it finishes
    Poll {
        /// Job ID returned by submit
        job_id: String,
    },
    /// Show a job's current status once
    Status {
        /// Job ID returned by submit
        job_id: String,
    },
    /// Show a finished job's result once
    Result {
        /// Job ID returned by submit
        job_id: String,
    },
}

/// Handle a CLI command
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The validated poller configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Submit { path } => job::submit_and_follow(config, &path).await,
        Commands::Poll { job_id } => job::follow(config, &job_id).await,
        Commands::Status { job_id } => job::show_status(config, &job_id).await,
        Commands::Result { job_id } => job::show_result(config, &job_id).await,
    }
}
