//! Template launching
//!
//! Launching is pure composition: trigger the template, validate the job id
//! in the acknowledgment, then let the caller's [`JobWatchStrategy`] decide
//! how to observe the job. No polling happens here.

use awx_core::domain::job::{Job, JobKind};
use awx_core::domain::template::{JobTemplate, WorkflowJobTemplate};
use awx_core::dto::launch::{JobLaunch, LaunchAck, WorkflowJobLaunch};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::poller::JobPoller;
use crate::resource::{Resource, ResourceService};
use crate::transport::{API_PREFIX, ApiRequest, fetch};
use crate::watch::{JobWatchStrategy, WatchConfig};

/// A resource that can start jobs
pub trait Launchable: Resource {
    /// Acknowledgment returned by the launch endpoint
    type Ack: LaunchAck + DeserializeOwned + Send;
    /// Family of the jobs this resource starts
    const JOB_KIND: JobKind;
}

impl Launchable for WorkflowJobTemplate {
    type Ack = WorkflowJobLaunch;
    const JOB_KIND: JobKind = JobKind::WorkflowJob;
}

impl Launchable for JobTemplate {
    type Ack = JobLaunch;
    const JOB_KIND: JobKind = JobKind::Job;
}

/// A launch that produced a job, and what watching it yielded
///
/// The acknowledgment is kept even when the watch failed, so the caller can
/// still report which job was started.
#[derive(Debug)]
pub struct Launched<A> {
    pub ack: A,
    pub outcome: Result<Job>,
}

impl<A: LaunchAck> Launched<A> {
    pub fn job_id(&self) -> u64 {
        self.ack.job_id()
    }

    /// Drop the acknowledgment and keep the watch outcome
    pub fn into_job(self) -> Result<Job> {
        self.outcome
    }
}

impl<R: Launchable> ResourceService<R> {
    pub fn launch_endpoint(template_id: u64) -> String {
        format!("{}/{}/{}/launch/", API_PREFIX, R::COLLECTION, template_id)
    }

    /// Poller for the jobs this collection launches
    pub fn job_poller(&self) -> JobPoller {
        JobPoller::new(self.transport.clone(), R::JOB_KIND)
    }

    /// Launch a template and watch the job it starts
    ///
    /// Errors from the launch request itself, and an acknowledgment without
    /// a usable job id, are returned as `Err`. Once a job exists the result
    /// of `strategy` is reported in [`Launched::outcome`].
    ///
    /// # Example
    /// ```no_run
    /// # use awx_client::AwxClient;
    /// # use awx_client::watch::{WaitForCompletion, WatchConfig};
    /// # use std::time::Duration;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = AwxClient::new("https://awx.example.com");
    /// let config = WatchConfig::bounded(Duration::from_secs(5), 120)?;
    /// let launched = client
    ///     .workflow_job_templates()
    ///     .launch(42, &WaitForCompletion::new(), &config)
    ///     .await?;
    /// let job = launched.into_job()?;
    /// println!("job {} finished: {}", job.id, job.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn launch(
        &self,
        template_id: u64,
        strategy: &dyn JobWatchStrategy,
        config: &WatchConfig,
    ) -> Result<Launched<R::Ack>> {
        self.launch_with(template_id, None, strategy, config).await
    }

    /// Launch with a request body, e.g. `{"extra_vars": {...}}`
    pub async fn launch_with(
        &self,
        template_id: u64,
        payload: Option<Value>,
        strategy: &dyn JobWatchStrategy,
        config: &WatchConfig,
    ) -> Result<Launched<R::Ack>> {
        let mut request = ApiRequest::post(Self::launch_endpoint(template_id));
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let ack: R::Ack = fetch(self.transport.as_ref(), request).await?;

        let job_id = ack.job_id();
        if job_id == 0 {
            warn!(
                "Launching {} {} returned no job",
                R::DISPLAY_NAME,
                template_id
            );
            return Err(ClientError::LaunchFailed(format!(
                "invalid job id 0 returned for {} {}",
                R::DISPLAY_NAME,
                template_id
            )));
        }

        info!(
            "Launched {} {} as {} {}",
            R::DISPLAY_NAME,
            template_id,
            R::JOB_KIND,
            job_id
        );

        let outcome = strategy.watch(&self.job_poller(), job_id, config).await;

        Ok(Launched { ack, outcome })
    }
}
