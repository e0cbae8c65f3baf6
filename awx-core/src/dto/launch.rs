//! Launch acknowledgments
//!
//! A launch endpoint answers with the id of the job it created. A missing
//! id decodes as `0`, which the API never assigns to a real job, so `0`
//! always means "the launch did not produce a job".

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Common view over the acknowledgments of every launch endpoint
pub trait LaunchAck {
    /// Id of the created job, `0` when none was created
    fn job_id(&self) -> u64;
}

/// Response of `POST /api/v2/job_templates/{id}/launch/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobLaunch {
    #[serde(default)]
    pub job: u64,
    #[serde(default)]
    pub ignored_fields: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LaunchAck for JobLaunch {
    fn job_id(&self) -> u64 {
        self.job
    }
}

/// Response of `POST /api/v2/workflow_job_templates/{id}/launch/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowJobLaunch {
    #[serde(default)]
    pub workflow_job: u64,
    #[serde(default)]
    pub ignored_fields: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LaunchAck for WorkflowJobLaunch {
    fn job_id(&self) -> u64 {
        self.workflow_job
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_launch_ack() {
        let ack: WorkflowJobLaunch = serde_json::from_value(serde_json::json!({
            "workflow_job": 7,
            "ignored_fields": { "extra_vars": { "x": 1 } },
            "id": 7
        }))
        .unwrap();

        assert_eq!(ack.job_id(), 7);
        assert!(ack.ignored_fields.contains_key("extra_vars"));
    }

    #[test]
    fn test_missing_job_id_decodes_as_zero() {
        let ack: JobLaunch = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(ack.job_id(), 0);

        let ack: WorkflowJobLaunch =
            serde_json::from_value(serde_json::json!({ "ignored_fields": {} })).unwrap();
        assert_eq!(ack.job_id(), 0);
    }
}
