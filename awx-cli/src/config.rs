//! Configuration module
//!
//! Handles CLI configuration: connection settings taken from flags and
//! environment, plus per-command watch parameters.

use anyhow::{Context, Result};
use awx_client::watch::WatchConfig;
use awx_client::{AwxClient, ClientConfig};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection settings for the AWX server
    pub client: ClientConfig,
}

impl Config {
    /// Same configuration with different watch parameters
    pub fn with_watch(&self, watch: WatchConfig) -> Self {
        Self {
            client: self.client.clone().with_watch(watch),
        }
    }

    /// Build a client, validating the configuration first
    pub fn connect(&self) -> Result<AwxClient> {
        AwxClient::from_config(&self.client).context("Invalid client configuration")
    }
}
