//! Watch strategies
//!
//! A strategy decides how a freshly launched job is observed. The launcher
//! only knows the [`JobWatchStrategy`] trait, so callers pick the policy
//! per launch.

use std::time::Duration;

use async_trait::async_trait;
use awx_core::domain::job::Job;

use super::{Backoff, WatchConfig, spawn_watch};
use crate::error::Result;
use crate::poller::JobPoller;

/// Observes a job until the strategy considers it done
#[async_trait]
pub trait JobWatchStrategy: Send + Sync {
    async fn watch(&self, poller: &JobPoller, job_id: u64, config: &WatchConfig) -> Result<Job>;
}

/// Poll exactly once and return whatever status the job has
///
/// Useful for fire-and-forget launches: the snapshot is usually still in flight.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOnce;

#[async_trait]
impl JobWatchStrategy for CheckOnce {
    async fn watch(&self, poller: &JobPoller, job_id: u64, _config: &WatchConfig) -> Result<Job> {
        poller.poll(job_id).await
    }
}

/// Poll on a background task until the job is terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct WaitForCompletion {
    backoff: Backoff,
    timeout: Option<Duration>,
}

impl WaitForCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Stop waiting (and cancel the watch) after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }
}

#[async_trait]
impl JobWatchStrategy for WaitForCompletion {
    async fn watch(&self, poller: &JobPoller, job_id: u64, config: &WatchConfig) -> Result<Job> {
        let handle = spawn_watch(poller.clone(), job_id, config.clone(), self.backoff);
        match self.timeout {
            Some(limit) => handle.outcome_within(limit).await,
            None => handle.outcome().await,
        }
    }
}
