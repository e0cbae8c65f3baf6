//! Template domain types
//!
//! Templates are the launchable resources: a job template starts a single
//! playbook run, a workflow job template starts a graph of them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Job template definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTemplate {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub inventory: Option<u64>,
    #[serde(default)]
    pub project: Option<u64>,
    #[serde(default)]
    pub playbook: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Workflow job template definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowJobTemplate {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub inventory: Option<u64>,
    #[serde(default)]
    pub project: Option<u64>,
    #[serde(default)]
    pub organization: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
