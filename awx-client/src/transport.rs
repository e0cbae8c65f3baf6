//! Transport layer
//!
//! The [`Transport`] trait is the only place the client touches the network.
//! Services build an [`ApiRequest`], hand it to the transport, then run
//! [`check_response`] and decode the body themselves. [`HttpTransport`] is
//! the `reqwest` implementation used outside of tests.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Versioned namespace every endpoint lives under
pub const API_PREFIX: &str = "/api/v2";

/// A request against an API endpoint, independent of the HTTP stack
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the server root, e.g. `/api/v2/workflow_jobs/7/`
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PATCH, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Append query parameters, keeping their iteration order
    pub fn query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw response as returned by a transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Performs API requests
///
/// Implementations report network and decoding failures as errors and
/// return every HTTP response, successful or not. HTTP-level success is
/// judged by [`check_response`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Turn a non-2xx response into an [`ClientError::ApiError`]
///
/// The server usually explains a rejection in a `detail` field; when it
/// does, that becomes the error message, otherwise the raw body is used.
pub fn check_response(response: &ApiResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    let detail = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string));

    let message = match detail {
        Some(detail) => detail,
        None if response.body.trim().is_empty() => "Unknown error".to_string(),
        None => response.body.trim().to_string(),
    };

    Err(ClientError::api_error(response.status, message))
}

/// Send a request, check the response and decode its body
pub(crate) async fn fetch<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: ApiRequest,
) -> Result<T> {
    let response = transport.send(request).await?;
    check_response(&response)?;
    response.json()
}

/// Send a request whose response carries no meaningful body
pub(crate) async fn fetch_empty(transport: &dyn Transport, request: ApiRequest) -> Result<()> {
    let response = transport.send(request).await?;
    check_response(&response)
}

/// `reqwest` backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL of the server (e.g., "https://awx.example.com")
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Use a preconfigured reqwest client
    ///
    /// This is where credentials, proxies and TLS settings belong, e.g. as
    /// default headers on the client.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Build a transport honoring the configured request timeout
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(config.base_url.clone(), client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.endpoint);
        debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("{} answered {}", url, status);

        Ok(ApiResponse { status, body })
    }
}
