//! Mock provider implementation for testing.

use super::{InferenceProvider, ProviderError};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

/// How the mock answers.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Respond with `{"echo": <payload>}`.
    Echo,
    /// Respond with a fixed document.
    Respond(Value),
    /// Fail as if the network call could not complete.
    NetworkFailure,
    /// Fail as if the upstream body was not JSON.
    InvalidResponse,
}

/// Mock inference provider that records every payload it receives.
pub struct MockProvider {
    behavior: MockBehavior,
    received: Mutex<Vec<Value>>,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Payloads received so far, oldest first.
    pub async fn received(&self) -> Vec<Value> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl InferenceProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate_content(&self, payload: &Value) -> Result<Value, ProviderError> {
        self.received.lock().await.push(payload.clone());

        match &self.behavior {
            MockBehavior::Echo => Ok(json!({ "echo": payload })),
            MockBehavior::Respond(body) => Ok(body.clone()),
            MockBehavior::NetworkFailure => Err(ProviderError::NetworkError(
                "mock connection refused".to_string(),
            )),
            MockBehavior::InvalidResponse => Err(ProviderError::InvalidResponse(
                "mock body was not JSON".to_string(),
            )),
        }
    }
}
