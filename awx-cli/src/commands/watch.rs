//! Watch options shared by every command that waits on a job

use std::time::Duration;

use anyhow::Result;
use awx_client::watch::{Backoff, MaxAttempts, WaitForCompletion, WatchConfig};
use clap::Args;

/// How to wait for a job
#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Seconds between two status checks
    #[arg(long, env = "AWX_POLL_INTERVAL", default_value_t = 5)]
    pub poll_interval: u64,

    /// Maximum number of status checks (unlimited when omitted)
    #[arg(long, env = "AWX_MAX_ATTEMPTS", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Double the delay after every check, up to this many seconds
    #[arg(long, value_name = "MAX_SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub backoff: Option<u64>,

    /// Stop waiting after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl WatchArgs {
    pub fn watch_config(&self) -> Result<WatchConfig> {
        let max_attempts = match self.max_attempts {
            Some(n) => MaxAttempts::limited(n)?,
            None => MaxAttempts::Unlimited,
        };
        Ok(WatchConfig::new(
            Duration::from_secs(self.poll_interval),
            max_attempts,
        ))
    }

    pub fn strategy(&self) -> WaitForCompletion {
        let mut strategy = WaitForCompletion::new();
        if let Some(max) = self.backoff {
            strategy = strategy.with_backoff(Backoff::exponential(2.0, Duration::from_secs(max)));
        }
        if let Some(timeout) = self.timeout {
            strategy = strategy.with_timeout(Duration::from_secs(timeout));
        }
        strategy
    }
}
