//! AWX HTTP Client
//!
//! A type-safe client for launching AWX / Ansible Tower templates and
//! waiting for the jobs they start.
//!
//! The client is organized in layers:
//! - [`transport`]: the HTTP boundary, behind the [`Transport`] trait
//! - [`resource`]: CRUD over template collections
//! - [`poller`]: one status fetch per call
//! - [`watch`]: background polling until a job is terminal
//! - [`launcher`]: launch a template and hand the job to a watch strategy
//!
//! # Example
//!
//! ```no_run
//! use awx_client::AwxClient;
//! use awx_client::watch::{WaitForCompletion, WatchConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AwxClient::new("https://awx.example.com");
//!
//!     let template = client.workflow_job_templates().get_by_name("nightly").await?;
//!     let launched = client
//!         .workflow_job_templates()
//!         .launch(template.id, &WaitForCompletion::new(), &WatchConfig::unbounded(Duration::from_secs(5)))
//!         .await?;
//!
//!     let job_id = launched.job_id();
//!     let job = launched.into_job()?;
//!     println!("Job {} ended as {}", job_id, job.status);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod launcher;
pub mod poller;
pub mod resource;
pub mod transport;
pub mod watch;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use launcher::{Launchable, Launched};
pub use poller::JobPoller;
pub use resource::{Resource, ResourceService};
pub use transport::{HttpTransport, Transport};

use awx_core::domain::job::JobKind;
use awx_core::domain::template::{JobTemplate, WorkflowJobTemplate};
use reqwest::Client;
use std::sync::Arc;

/// Entry point to the AWX API
///
/// Hands out services for the template collections and pollers for the job
/// collections, all sharing one transport.
#[derive(Clone)]
pub struct AwxClient {
    transport: Arc<dyn Transport>,
}

impl AwxClient {
    /// Create a new client talking HTTP to `base_url`
    ///
    /// # Example
    /// ```
    /// use awx_client::AwxClient;
    ///
    /// let client = AwxClient::new("https://awx.example.com");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new(base_url)))
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use awx_client::AwxClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = AwxClient::with_client("https://awx.example.com", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self::with_transport(Arc::new(HttpTransport::with_client(base_url, client)))
    }

    /// Create a client from a validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_transport(Arc::new(HttpTransport::from_config(
            config,
        )?)))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Service for any resource collection
    pub fn service<R: Resource>(&self) -> ResourceService<R> {
        ResourceService::new(Arc::clone(&self.transport))
    }

    pub fn workflow_job_templates(&self) -> ResourceService<WorkflowJobTemplate> {
        self.service()
    }

    pub fn job_templates(&self) -> ResourceService<JobTemplate> {
        self.service()
    }

    /// Poller for jobs started by job templates
    pub fn jobs(&self) -> JobPoller {
        JobPoller::new(Arc::clone(&self.transport), JobKind::Job)
    }

    /// Poller for jobs started by workflow job templates
    pub fn workflow_jobs(&self) -> JobPoller {
        JobPoller::new(Arc::clone(&self.transport), JobKind::WorkflowJob)
    }
}
