//! Job command handlers
//!
//! Handles checking the status of a job and waiting for a running job
//! to finish.

use anyhow::{Result, bail};
use awx_client::watch::JobWatchStrategy;
use awx_client::{AwxClient, JobPoller};
use awx_core::domain::job::Job;
use clap::Subcommand;
use colored::*;
use tracing::debug;

use super::watch::WatchArgs;
use crate::config::Config;
use crate::output::print_job_details;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Show the current status of a job
    Status {
        /// Job ID
        id: u64,

        /// The job was started by a workflow job template
        #[arg(short, long)]
        workflow: bool,
    },
    /// Wait for a job to finish
    Wait {
        /// Job ID
        id: u64,

        /// The job was started by a workflow job template
        #[arg(short, long)]
        workflow: bool,

        #[command(flatten)]
        watch: WatchArgs,
    },
}

/// Handle job commands
///
/// Routes job subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The job command to execute
/// * `config` - The CLI configuration
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    match command {
        JobCommands::Status { id, workflow } => {
            let client = config.connect()?;
            job_status(&poller(&client, workflow), id).await
        }
        JobCommands::Wait {
            id,
            workflow,
            watch,
        } => wait_for_job(config, id, workflow, &watch).await,
    }
}

fn poller(client: &AwxClient, workflow: bool) -> JobPoller {
    if workflow {
        client.workflow_jobs()
    } else {
        client.jobs()
    }
}

/// Fetch and display a single job snapshot
async fn job_status(poller: &JobPoller, id: u64) -> Result<()> {
    let job = poller.poll(id).await?;

    print_job_details(&job);

    Ok(())
}

/// Wait for a job until it is terminal
async fn wait_for_job(config: &Config, id: u64, workflow: bool, watch: &WatchArgs) -> Result<()> {
    let config = config.with_watch(watch.watch_config()?);
    let client = config.connect()?;
    let poller = poller(&client, workflow);

    debug!(job_id = id, kind = %poller.kind(), watch = ?config.client.watch, "Waiting for job");
    println!(
        "Waiting for {} {} (max attempts: {})...",
        poller.kind(),
        id,
        config.client.watch.max_attempts
    );

    let outcome = watch
        .strategy()
        .watch(&poller, id, &config.client.watch)
        .await;

    report_outcome(outcome, true)
}

/// Print what watching a job produced
///
/// When `waited` is set, a job that did not end successfully is an error.
pub(super) fn report_outcome(outcome: awx_client::Result<Job>, waited: bool) -> Result<()> {
    match outcome {
        Ok(job) => {
            print_job_details(&job);
            if waited && !job.succeeded() {
                bail!("Job {} finished with status {}", job.id, job.status);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(job) = err.last_snapshot() {
                println!("{}", "Last known state:".yellow());
                print_job_details(job);
                println!();
            }
            Err(err.into())
        }
    }
}
