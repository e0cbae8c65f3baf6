//! Transport doubles shared by the unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Replays canned responses in order and records every request
///
/// Once the script runs out, the fallback response is returned if one was
/// set, otherwise every further request fails.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<ApiResponse>>>,
    fallback: Option<ApiResponse>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn then(self, step: Result<ApiResponse>) -> Self {
        self.script.lock().unwrap().push_back(step);
        self
    }

    pub(crate) fn then_ok(self, body: Value) -> Self {
        self.then_status(200, body)
    }

    pub(crate) fn then_status(self, status: u16, body: Value) -> Self {
        self.then(Ok(ApiResponse::new(status, body.to_string())))
    }

    pub(crate) fn then_jobs(mut self, job_id: u64, statuses: &[&str]) -> Self {
        for status in statuses {
            self = self.then_ok(job_body(job_id, status));
        }
        self
    }

    pub(crate) fn otherwise(mut self, body: Value) -> Self {
        self.fallback = Some(ApiResponse::new(200, body.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);

        let next = self.script.lock().unwrap().pop_front();
        match (next, &self.fallback) {
            (Some(step), _) => step,
            (None, Some(fallback)) => Ok(fallback.clone()),
            (None, None) => Err(ClientError::ParseError("script exhausted".to_string())),
        }
    }
}

/// Transport whose every request panics
pub(crate) struct PanickingTransport;

#[async_trait]
impl Transport for PanickingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        panic!("transport exploded on {}", request.endpoint);
    }
}

pub(crate) fn job_body(job_id: u64, status: &str) -> Value {
    serde_json::json!({
        "id": job_id,
        "name": "deploy",
        "status": status,
        "failed": status == "failed",
    })
}
