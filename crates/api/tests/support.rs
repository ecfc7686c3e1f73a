//! Shared helpers for `copion-api` integration tests.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use copion_api::{router, AppContext};
use copion_core::PersistenceGateway;
use copion_domain::Config;
use copion_infra::MemoryGateway;
use serde_json::Value;
use tower::ServiceExt;

/// Router plus the context behind it.
pub struct TestApp {
    pub ctx: Arc<AppContext>,
    router: Router,
}

impl TestApp {
    /// App backed by a fresh in-memory gateway.
    pub async fn new() -> Self {
        Self::with_gateway(Arc::new(MemoryGateway::default())).await
    }

    pub async fn with_gateway(gateway: Arc<dyn PersistenceGateway>) -> Self {
        let ctx = Arc::new(AppContext::with_gateway(Config::default(), gateway).await);
        let router = router(Arc::clone(&ctx));
        Self { ctx, router }
    }

    /// Send one request and decode the JSON response body.
    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    /// Send a raw body verbatim.
    pub async fn call_raw(&self, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    /// Create a profile and return its id.
    pub async fn create(&self, username: &str) -> String {
        let (status, body) = self
            .call(Method::POST, "/api/perfiles", Some(serde_json::json!({ "username": username })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }
}
