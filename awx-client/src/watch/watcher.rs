//! Background watch loop and its handle

use std::time::Duration;

use awx_core::domain::job::Job;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{Backoff, WatchConfig};
use crate::error::{ClientError, Result};
use crate::poller::JobPoller;

/// Caller side of a running watch
///
/// The outcome can be read once. Dropping the handle cancels the watch, so
/// a loop never keeps polling for a caller that has gone away.
#[derive(Debug)]
pub struct WatchHandle {
    job_id: u64,
    outcome: oneshot::Receiver<Result<Job>>,
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Start watching a job on a new task
///
/// Must be called from within a tokio runtime.
pub fn spawn_watch(
    poller: JobPoller,
    job_id: u64,
    config: WatchConfig,
    backoff: Backoff,
) -> WatchHandle {
    let (outcome_tx, outcome_rx) = oneshot::channel();
    let (cancel_tx, cancel_rx) = watch::channel(false);

    debug!(
        "Watching {} {} (interval: {:?}, max attempts: {})",
        poller.kind(),
        job_id,
        config.poll_interval,
        config.max_attempts
    );

    let task = tokio::spawn(async move {
        let outcome = run_watch(&poller, job_id, &config, backoff, cancel_rx).await;
        if outcome_tx.send(outcome).is_err() {
            debug!("Nobody is waiting on the watch of job {} anymore", job_id);
        }
    });

    WatchHandle {
        job_id,
        outcome: outcome_rx,
        cancel: cancel_tx,
        task,
    }
}

impl WatchHandle {
    pub fn job_id(&self) -> u64 {
        self.job_id
    }

    /// Ask the loop to stop at its next poll or sleep
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    /// Whether the background task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the single outcome of the watch
    ///
    /// If the task dies without reporting (e.g. it panicked), this resolves
    /// to [`ClientError::WatcherAborted`] instead of waiting forever.
    pub async fn outcome(mut self) -> Result<Job> {
        let job_id = self.job_id;
        (&mut self.outcome)
            .await
            .unwrap_or_else(|_| Err(ClientError::WatcherAborted { job_id }))
    }

    /// Like [`outcome`](Self::outcome), but gives up after `limit`
    ///
    /// On expiry the watch is cancelled and [`ClientError::Timeout`] returned.
    pub async fn outcome_within(mut self, limit: Duration) -> Result<Job> {
        let job_id = self.job_id;
        match tokio::time::timeout(limit, &mut self.outcome).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Err(ClientError::WatcherAborted { job_id }),
            Err(_) => {
                warn!("Gave up waiting on job {} after {:?}", job_id, limit);
                self.cancel();
                Err(ClientError::Timeout {
                    job_id,
                    after: limit,
                })
            }
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}

async fn run_watch(
    poller: &JobPoller,
    job_id: u64,
    config: &WatchConfig,
    backoff: Backoff,
    mut cancel: watch::Receiver<bool>,
) -> Result<Job> {
    let mut attempts: u32 = 0;

    loop {
        let job = tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => return Err(stopped(job_id, attempts)),
            polled = poller.poll(job_id) => match polled {
                Ok(job) => job,
                Err(e) => {
                    warn!("Polling job {} failed: {}", job_id, e);
                    return Err(e);
                }
            },
        };
        attempts = attempts.saturating_add(1);

        if job.status.is_terminal() {
            info!(
                "Job {} finished with status {} after {} poll(s)",
                job_id, job.status, attempts
            );
            return Ok(job);
        }

        if !config.max_attempts.allows_another(attempts) {
            warn!(
                "Job {} still {} after {} poll(s), giving up",
                job_id, job.status, attempts
            );
            return Err(ClientError::AttemptsExhausted {
                job_id,
                attempts,
                last: Box::new(job),
            });
        }

        let delay = backoff.delay(config.poll_interval, attempts);
        debug!(
            "Job {} is {} (poll {}/{}), next poll in {:?}",
            job_id, job.status, attempts, config.max_attempts, delay
        );

        tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => return Err(stopped(job_id, attempts)),
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

/// Resolves once cancellation is requested or the handle is gone
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            return;
        }
    }
}

fn stopped(job_id: u64, attempts: u32) -> ClientError {
    info!("Watch of job {} cancelled after {} poll(s)", job_id, attempts);
    ClientError::Cancelled { job_id }
}
