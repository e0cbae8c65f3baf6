//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of a remote job as last returned by its status endpoint
///
/// The same shape is used for plain jobs and workflow jobs; anything not
/// modeled here is kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub status: JobStatus,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub failed: bool,
    #[serde(default)]
    pub started: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished: Option<DateTime<Utc>>,
    /// Seconds between start and finish as reported by the server
    #[serde(default)]
    pub elapsed: f64,
    #[serde(default)]
    pub job_explanation: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// True once the job has left the in-flight statuses
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// True only for a job that finished with `successful`
    pub fn succeeded(&self) -> bool {
        self.status == JobStatus::Successful
    }
}

/// Job lifecycle status
///
/// `Pending`, `Waiting` and `Running` are in-flight; every other status is
/// terminal and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Waiting,
    Running,
    Successful,
    Failed,
    Error,
    Canceled,
}

impl JobStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [JobStatus; 7] = [
        JobStatus::Pending,
        JobStatus::Waiting,
        JobStatus::Running,
        JobStatus::Successful,
        JobStatus::Failed,
        JobStatus::Error,
        JobStatus::Canceled,
    ];

    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            JobStatus::Pending | JobStatus::Waiting | JobStatus::Running
        )
    }

    pub fn is_terminal(self) -> bool {
        !self.is_in_flight()
    }

    /// Wire representation of the status
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Waiting => "waiting",
            JobStatus::Running => "running",
            JobStatus::Successful => "successful",
            JobStatus::Failed => "failed",
            JobStatus::Error => "error",
            JobStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which family of job a status snapshot belongs to
///
/// Job templates launch plain jobs; workflow job templates launch workflow
/// jobs. Each family has its own status collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Job,
    WorkflowJob,
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKind::Job => write!(f, "job"),
            JobKind::WorkflowJob => write!(f, "workflow job"),
        }
    }
}
