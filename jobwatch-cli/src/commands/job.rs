//! Job command handlers
//!
//! `submit` and `poll` drive a [`JobPoller`] with the terminal presenter;
//! `status` and `result` are single requests.

use anyhow::{Context, Result, bail};
use colored::*;
use jobwatch_client::{JobServiceClient, ResultOutcome};
use jobwatch_core::domain::upload::UploadFile;
use jobwatch_poller::{Config, JobPoller, result_text};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::presenter::{ConsolePresenter, Outcome, colorize_status};

/// Submit a file, then follow the created job
pub async fn submit_and_follow(config: &Config, path: &Path) -> Result<()> {
    let file = UploadFile::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let presenter = Arc::new(ConsolePresenter::new());
    let poller = build_poller(config, Arc::clone(&presenter))?;

    if let Err(e) = poller.submit(&file).await {
        bail!("Submit failed: {}", e);
    }

    wait_for_outcome(&poller, &presenter).await
}

/// Follow an existing job
pub async fn follow(config: &Config, job_id: &str) -> Result<()> {
    let presenter = Arc::new(ConsolePresenter::with_job_id(job_id));
    let poller = build_poller(config, Arc::clone(&presenter))?;

    if !poller.watch_current() {
        bail!("A job id is required");
    }

    wait_for_outcome(&poller, &presenter).await
}

/// Fetch and print a job's status once
pub async fn show_status(config: &Config, job_id: &str) -> Result<()> {
    let client = config.build_client()?;
    let status = client.get_job_status(job_id).await?;

    println!("{}", "Job Status:".bold());
    println!(
        "  ID:     {}",
        status.job_id.as_deref().unwrap_or(job_id).cyan()
    );
    println!("  Status: {}", colorize_status(status.status.as_str()));
    if let Some(error) = &status.error {
        println!("  Error:  {}", error.red());
    }

    Ok(())
}

/// Fetch and print a job's result once
pub async fn show_result(config: &Config, job_id: &str) -> Result<()> {
    let client: JobServiceClient = config.build_client()?;

    match client.get_job_result(job_id).await? {
        ResultOutcome::Ready(result) => println!("{}", result_text(result)),
        ResultOutcome::Pending(message) => {
            println!("{}", "⚠ Result not ready yet".yellow());
            println!("{}", message.dimmed());
        }
    }

    Ok(())
}

fn build_poller(config: &Config, presenter: Arc<ConsolePresenter>) -> Result<JobPoller> {
    debug!(
        "Using job service at {} (interval: {:?}, timeout: {:?})",
        config.server_url, config.poll_interval, config.request_timeout
    );
    let client = config.build_client()?;
    Ok(JobPoller::new(config, Arc::new(client), presenter))
}

/// Waits for the poll loop to end, or stops it on Ctrl-C
async fn wait_for_outcome(poller: &JobPoller, presenter: &ConsolePresenter) -> Result<()> {
    tokio::select! {
        _ = poller.wait() => {}
        _ = tokio::signal::ctrl_c() => poller.stop(),
    }

    match presenter.outcome() {
        Outcome::Failed => bail!("Job did not complete"),
        Outcome::Completed | Outcome::Stopped | Outcome::Running => Ok(()),
    }
}
