//! Job poller
//!
//! Fetches the current status snapshot of a single job. The poller performs
//! exactly one request per call; retry policy belongs to the watcher.

use std::fmt;
use std::sync::Arc;

use awx_core::domain::job::{Job, JobKind};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::transport::{API_PREFIX, ApiRequest, Transport, fetch};

/// Reads job status snapshots for one family of jobs
#[derive(Clone)]
pub struct JobPoller {
    transport: Arc<dyn Transport>,
    kind: JobKind,
}

impl JobPoller {
    pub fn new(transport: Arc<dyn Transport>, kind: JobKind) -> Self {
        Self { transport, kind }
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    /// Status endpoint of a job
    pub fn endpoint(&self, job_id: u64) -> String {
        let collection = match self.kind {
            JobKind::Job => "jobs",
            JobKind::WorkflowJob => "workflow_jobs",
        };
        format!("{}/{}/{}/", API_PREFIX, collection, job_id)
    }

    /// Fetch the current snapshot of a job
    ///
    /// Network and decoding failures surface as transport errors, non-2xx
    /// answers as [`ClientError::ApiError`].
    pub async fn poll(&self, job_id: u64) -> Result<Job> {
        if job_id == 0 {
            return Err(ClientError::InvalidRequest(
                "job id must be a positive integer".to_string(),
            ));
        }

        let job: Job = fetch(self.transport.as_ref(), ApiRequest::get(self.endpoint(job_id))).await?;
        debug!("{} {} is {}", self.kind, job_id, job.status);

        Ok(job)
    }
}

impl fmt::Debug for JobPoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobPoller").field("kind", &self.kind).finish()
    }
}
