//! Job watching
//!
//! A watch repeatedly polls one job until it reaches a terminal status, the
//! attempt bound runs out, a poll fails, or the caller cancels. The polling
//! loop runs on its own task and hands exactly one outcome back through a
//! [`WatchHandle`].
//!
//! Attempt bound convention: at most `max_attempts` polls are performed.
//! The bound is checked right after each in-flight poll, before sleeping,
//! so a watch limited to N polls sleeps N-1 times and never polls N+1 times.

mod strategy;
mod watcher;

pub use strategy::{CheckOnce, JobWatchStrategy, WaitForCompletion};
pub use watcher::{WatchHandle, spawn_watch};

use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Upper bound on the number of polls in one watch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAttempts {
    Limited(NonZeroU32),
    /// Poll until the job is terminal or a poll fails
    Unlimited,
}

impl MaxAttempts {
    /// A bound of `n` polls; `0` is rejected
    pub fn limited(n: u32) -> Result<Self> {
        NonZeroU32::new(n)
            .map(Self::Limited)
            .ok_or_else(|| ClientError::InvalidRequest("max attempts must be at least 1".into()))
    }

    /// Interpret the integer form used by the API tooling, where `-1` means unlimited
    pub fn from_raw(raw: i64) -> Result<Self> {
        match raw {
            -1 => Ok(Self::Unlimited),
            n if n > 0 && n <= u32::MAX as i64 => Self::limited(n as u32),
            n => Err(ClientError::InvalidRequest(format!(
                "max attempts must be -1 or between 1 and {}, got {}",
                u32::MAX,
                n
            ))),
        }
    }

    /// Whether another poll is allowed after `performed` polls
    pub fn allows_another(self, performed: u32) -> bool {
        match self {
            Self::Limited(n) => performed < n.get(),
            Self::Unlimited => true,
        }
    }
}

impl fmt::Display for MaxAttempts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{}", n),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Polling parameters of one watch
#[derive(Debug, Clone, PartialEq)]
pub struct WatchConfig {
    /// Delay between two polls (the base delay when backing off)
    pub poll_interval: Duration,
    pub max_attempts: MaxAttempts,
}

impl WatchConfig {
    pub fn new(poll_interval: Duration, max_attempts: MaxAttempts) -> Self {
        Self {
            poll_interval,
            max_attempts,
        }
    }

    /// At most `max_attempts` polls, `poll_interval` apart
    pub fn bounded(poll_interval: Duration, max_attempts: u32) -> Result<Self> {
        Ok(Self::new(poll_interval, MaxAttempts::limited(max_attempts)?))
    }

    pub fn unbounded(poll_interval: Duration) -> Self {
        Self::new(poll_interval, MaxAttempts::Unlimited)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::unbounded(Duration::from_secs(5))
    }
}

/// How the delay between polls evolves over a watch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Backoff {
    /// Always wait `poll_interval`
    #[default]
    Fixed,
    /// Wait `poll_interval * multiplier^(k-1)` after the k-th poll, capped at `max_interval`
    Exponential { multiplier: f64, max_interval: Duration },
}

impl Backoff {
    pub fn exponential(multiplier: f64, max_interval: Duration) -> Self {
        Self::Exponential {
            multiplier: multiplier.max(1.0),
            max_interval,
        }
    }

    /// Delay before the next poll, given `attempts` polls performed so far
    ///
    /// Never shorter than `poll_interval`, even when `max_interval` is.
    pub fn delay(&self, poll_interval: Duration, attempts: u32) -> Duration {
        match *self {
            Self::Fixed => poll_interval,
            Self::Exponential {
                multiplier,
                max_interval,
            } => {
                let exponent = attempts.saturating_sub(1).min(i32::MAX as u32) as i32;
                let secs = poll_interval.as_secs_f64() * multiplier.powi(exponent);
                let capped = if !secs.is_finite() || secs >= max_interval.as_secs_f64() {
                    max_interval
                } else {
                    Duration::from_secs_f64(secs.max(0.0))
                };
                capped.max(poll_interval)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limited_rejects_zero() {
        assert!(MaxAttempts::limited(0).is_err());
        assert!(WatchConfig::bounded(Duration::from_secs(1), 0).is_err());
        assert_eq!(
            MaxAttempts::limited(3).unwrap(),
            MaxAttempts::Limited(NonZeroU32::new(3).unwrap())
        );
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(MaxAttempts::from_raw(-1).unwrap(), MaxAttempts::Unlimited);
        assert_eq!(MaxAttempts::from_raw(5).unwrap(), MaxAttempts::limited(5).unwrap());
        assert!(MaxAttempts::from_raw(0).is_err());
        assert!(MaxAttempts::from_raw(-2).is_err());
        assert!(MaxAttempts::from_raw(i64::MAX).is_err());
    }

    #[test]
    fn test_allows_another() {
        let bound = MaxAttempts::limited(3).unwrap();
        assert!(bound.allows_another(0));
        assert!(bound.allows_another(2));
        assert!(!bound.allows_another(3));

        let single = MaxAttempts::limited(1).unwrap();
        assert!(!single.allows_another(1));

        assert!(MaxAttempts::Unlimited.allows_another(u32::MAX));
    }

    #[test]
    fn test_max_attempts_display() {
        assert_eq!(MaxAttempts::limited(4).unwrap().to_string(), "4");
        assert_eq!(MaxAttempts::Unlimited.to_string(), "unlimited");
    }

    #[test]
    fn test_fixed_backoff() {
        let interval = Duration::from_secs(2);
        assert_eq!(Backoff::Fixed.delay(interval, 1), interval);
        assert_eq!(Backoff::Fixed.delay(interval, 50), interval);
    }

    #[test]
    fn test_exponential_backoff_grows_and_caps() {
        let backoff = Backoff::exponential(2.0, Duration::from_secs(10));
        let base = Duration::from_secs(1);

        assert_eq!(backoff.delay(base, 1), Duration::from_secs(1));
        assert_eq!(backoff.delay(base, 2), Duration::from_secs(2));
        assert_eq!(backoff.delay(base, 3), Duration::from_secs(4));
        assert_eq!(backoff.delay(base, 4), Duration::from_secs(8));
        assert_eq!(backoff.delay(base, 5), Duration::from_secs(10));
        assert_eq!(backoff.delay(base, u32::MAX), Duration::from_secs(10));
    }

    #[test]
    fn test_exponential_cap_below_interval_keeps_interval() {
        let base = Duration::from_secs(30);

        let zero_cap = Backoff::exponential(2.0, Duration::ZERO);
        for attempts in 1..=3 {
            assert_eq!(zero_cap.delay(base, attempts), base);
        }

        let short_cap = Backoff::exponential(2.0, Duration::from_secs(1));
        assert_eq!(short_cap.delay(base, 1), base);
        assert_eq!(short_cap.delay(base, 4), base);
    }

    #[test]
    fn test_exponential_multiplier_is_clamped() {
        let backoff = Backoff::exponential(0.5, Duration::from_secs(10));
        let base = Duration::from_secs(3);
        assert_eq!(backoff.delay(base, 4), base);
    }
}
