//! Template resource endpoints
//!
//! [`ResourceService`] issues the CRUD calls of one named collection under
//! `/api/v2/`. It is a thin pass-through: apart from the mandatory-field
//! check on create, payloads are sent as given.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use awx_core::domain::template::{JobTemplate, WorkflowJobTemplate};
use awx_core::dto::list::ListResponse;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{ClientError, Result};
use crate::transport::{API_PREFIX, ApiRequest, Transport, fetch, fetch_empty};

/// A resource that lives in a named collection
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Collection name as it appears in the URL
    const COLLECTION: &'static str;
    /// Human readable name used in messages
    const DISPLAY_NAME: &'static str;
    /// Fields a create payload must carry
    const MANDATORY_FIELDS: &'static [&'static str];
}

impl Resource for WorkflowJobTemplate {
    const COLLECTION: &'static str = "workflow_job_templates";
    const DISPLAY_NAME: &'static str = "workflow job template";
    const MANDATORY_FIELDS: &'static [&'static str] = &["name", "job_type", "inventory", "project"];
}

impl Resource for JobTemplate {
    const COLLECTION: &'static str = "job_templates";
    const DISPLAY_NAME: &'static str = "job template";
    const MANDATORY_FIELDS: &'static [&'static str] = &["name", "job_type", "inventory", "project"];
}

/// CRUD operations over the collection of `R`
pub struct ResourceService<R> {
    pub(crate) transport: Arc<dyn Transport>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for ResourceService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceService")
            .field("collection", &R::COLLECTION)
            .finish()
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    pub fn collection_endpoint() -> String {
        format!("{}/{}/", API_PREFIX, R::COLLECTION)
    }

    pub fn item_endpoint(id: u64) -> String {
        format!("{}/{}/{}/", API_PREFIX, R::COLLECTION, id)
    }

    /// List one page of the collection, filtered by `params`
    pub async fn list(&self, params: &[(&str, &str)]) -> Result<ListResponse<R>> {
        let request = ApiRequest::get(Self::collection_endpoint()).query(params.iter().copied());
        let page: ListResponse<R> = fetch(self.transport.as_ref(), request).await?;

        debug!("Listed {} {}(s)", page.count, R::DISPLAY_NAME);

        Ok(page)
    }

    /// Get a resource by id
    pub async fn get(&self, id: u64) -> Result<R> {
        fetch(self.transport.as_ref(), ApiRequest::get(Self::item_endpoint(id))).await
    }

    /// Get the first resource whose name matches exactly
    pub async fn get_by_name(&self, name: &str) -> Result<R> {
        self.list(&[("name", name)])
            .await?
            .into_first()
            .ok_or_else(|| ClientError::NotFound(format!("{} {:?}", R::DISPLAY_NAME, name)))
    }

    /// Create a resource
    ///
    /// Fails with [`ClientError::ValidationError`] before any request is
    /// sent when a mandatory field is absent.
    pub async fn create(&self, data: &Map<String, Value>, params: &[(&str, &str)]) -> Result<R> {
        validate_params(data, R::MANDATORY_FIELDS)?;

        let request = ApiRequest::post(Self::collection_endpoint())
            .query(params.iter().copied())
            .json(Value::Object(data.clone()));
        let created = fetch(self.transport.as_ref(), request).await?;

        info!("Created {}", R::DISPLAY_NAME);

        Ok(created)
    }

    /// Apply a partial update
    pub async fn update(
        &self,
        id: u64,
        data: &Map<String, Value>,
        params: &[(&str, &str)],
    ) -> Result<R> {
        let request = ApiRequest::patch(Self::item_endpoint(id))
            .query(params.iter().copied())
            .json(Value::Object(data.clone()));
        let updated = fetch(self.transport.as_ref(), request).await?;

        info!("Updated {} {}", R::DISPLAY_NAME, id);

        Ok(updated)
    }

    /// Delete a resource
    pub async fn delete(&self, id: u64) -> Result<()> {
        fetch_empty(self.transport.as_ref(), ApiRequest::delete(Self::item_endpoint(id))).await?;

        info!("Deleted {} {}", R::DISPLAY_NAME, id);

        Ok(())
    }
}

/// Check that every mandatory field is present and not null
pub fn validate_params(data: &Map<String, Value>, mandatory: &[&str]) -> Result<()> {
    let missing: Vec<String> = mandatory
        .iter()
        .filter(|field| data.get(**field).is_none_or(Value::is_null))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ClientError::ValidationError { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedTransport;
    use reqwest::Method;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn service(transport: &Arc<ScriptedTransport>) -> ResourceService<WorkflowJobTemplate> {
        ResourceService::new(transport.clone())
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(
            ResourceService::<WorkflowJobTemplate>::collection_endpoint(),
            "/api/v2/workflow_job_templates/"
        );
        assert_eq!(
            ResourceService::<JobTemplate>::item_endpoint(3),
            "/api/v2/job_templates/3/"
        );
    }

    #[test]
    fn test_validate_params_reports_all_missing() {
        let data = payload(json!({ "name": "x", "project": null }));
        match validate_params(&data, WorkflowJobTemplate::MANDATORY_FIELDS) {
            Err(ClientError::ValidationError { missing }) => {
                assert_eq!(missing, vec!["job_type", "inventory", "project"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_missing_inventory_sends_nothing() {
        let transport = Arc::new(ScriptedTransport::new());
        let data = payload(json!({ "name": "deploy", "job_type": "run", "project": 4 }));

        let err = service(&transport).create(&data, &[]).await.unwrap_err();

        match err {
            ClientError::ValidationError { missing } => assert_eq!(missing, vec!["inventory"]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_posts_payload() {
        let transport = Arc::new(
            ScriptedTransport::new().then_status(201, json!({ "id": 11, "name": "deploy" })),
        );
        let data = payload(json!({
            "name": "deploy", "job_type": "run", "inventory": 2, "project": 4
        }));

        let created = service(&transport).create(&data, &[]).await.unwrap();

        assert_eq!(created.id, 11);
        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].endpoint, "/api/v2/workflow_job_templates/");
        assert_eq!(requests[0].body, Some(Value::Object(data)));
    }

    #[tokio::test]
    async fn test_get_by_name_filters_listing() {
        let transport = Arc::new(ScriptedTransport::new().then_ok(json!({
            "count": 1,
            "results": [{ "id": 42, "name": "nightly" }]
        })));

        let template = service(&transport).get_by_name("nightly").await.unwrap();

        assert_eq!(template.id, 42);
        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(
            requests[0].query,
            vec![("name".to_string(), "nightly".to_string())]
        );
    }

    #[tokio::test]
    async fn test_get_by_name_not_found() {
        let transport =
            Arc::new(ScriptedTransport::new().then_ok(json!({ "count": 0, "results": [] })));

        let err = service(&transport).get_by_name("ghost").await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let transport =
            Arc::new(ScriptedTransport::new().then_ok(json!({ "id": 9, "name": "weekly" })));

        let template = service(&transport).get(9).await.unwrap();

        assert_eq!(template.name, "weekly");
        assert_eq!(
            transport.requests()[0].endpoint,
            "/api/v2/workflow_job_templates/9/"
        );
    }

    #[tokio::test]
    async fn test_update_patches() {
        let transport = Arc::new(
            ScriptedTransport::new().then_ok(json!({ "id": 9, "name": "renamed" })),
        );
        let data = payload(json!({ "name": "renamed" }));

        let updated = service(&transport).update(9, &data, &[]).await.unwrap();

        assert_eq!(updated.name, "renamed");
        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.endpoint, "/api/v2/workflow_job_templates/9/");
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let transport = Arc::new(ScriptedTransport::new().then(Ok(
            crate::transport::ApiResponse::new(204, ""),
        )));

        service(&transport).delete(9).await.unwrap();

        assert_eq!(transport.requests()[0].method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_api_rejection_propagates() {
        let transport = Arc::new(
            ScriptedTransport::new().then_status(403, json!({ "detail": "Permission denied." })),
        );

        let err = service(&transport).delete(9).await.unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "API error (status 403): Permission denied.");
    }
}
