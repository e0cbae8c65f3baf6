//! Client configuration
//!
//! Connection settings plus the default watch parameters used when a job
//! is launched and waited on.

use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::watch::WatchConfig;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://awx.example.com")
    pub base_url: String,

    /// Timeout applied to every single HTTP request
    pub request_timeout: Duration,

    /// Default polling parameters for job watches
    pub watch: WatchConfig,
}

impl ClientConfig {
    /// Creates a new configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(30),
            watch: WatchConfig::default(),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_watch(mut self, watch: WatchConfig) -> Self {
        self.watch = watch;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ClientError::InvalidRequest(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::InvalidRequest(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ClientError::InvalidRequest(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.watch.poll_interval.is_zero() {
            return Err(ClientError::InvalidRequest(
                "poll_interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8052")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watch::MaxAttempts;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.watch.poll_interval, Duration::from_secs(5));
        assert_eq!(config.watch.max_attempts, MaxAttempts::Unlimited);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.base_url = String::new();
        assert!(config.validate().is_err());

        config.base_url = "awx.example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://awx.example.com".to_string();
        assert!(config.validate().is_ok());

        let config = config.with_request_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let config = ClientConfig::default()
            .with_watch(WatchConfig::new(Duration::ZERO, MaxAttempts::Unlimited));
        assert!(matches!(
            config.validate(),
            Err(ClientError::InvalidRequest(_))
        ));
    }
}
