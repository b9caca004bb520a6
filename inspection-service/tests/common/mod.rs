#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use inspection_service::config::{
    GeminiSettings, HttpSettings, InspectionConfig, TrainingSettings, DEFAULT_MAX_BODY_BYTES,
};
use inspection_service::services::providers::mock::{MockBehavior, MockProvider};
use inspection_service::startup::{build_router, AppState};
use secrecy::Secret;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub fn test_config(dir: &Path) -> InspectionConfig {
    InspectionConfig {
        common: service_core::config::Config {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port for testing
            log_level: "debug".to_string(),
        },
        gemini: GeminiSettings {
            api_key: Secret::new("test-api-key".to_string()),
            model: "gemini-test".to_string(),
            api_base: "http://127.0.0.1:9/v1beta".to_string(),
            timeout_secs: Some(5),
        },
        training: TrainingSettings {
            data_path: dir.join("training_data.json"),
            max_entries: 100,
            prompt_examples: 10,
        },
        http: HttpSettings {
            static_dir: dir.join("public"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        },
    }
}

/// Router wired to a mock provider and a scratch data directory.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub provider: Arc<MockProvider>,
    pub data_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::with_behavior(MockBehavior::Echo).await
    }

    pub async fn with_behavior(behavior: MockBehavior) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let provider = Arc::new(MockProvider::new(behavior));
        let state = AppState::new(test_config(data_dir.path()), provider.clone());
        state
            .store
            .initialize()
            .await
            .expect("Failed to initialize training store");

        TestApp {
            router: build_router(state.clone()),
            state,
            provider,
            data_dir,
        }
    }

    /// Send a request and decode the JSON response (`Null` for empty bodies).
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed to respond");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// POST an arbitrary body, returning status, `content-type` and decoded JSON.
    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> (StatusCode, String, Value) {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body.into()).unwrap())
            .await
            .expect("Router failed to respond");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, content_type, json)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}
