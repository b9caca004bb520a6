//! Inference provider abstractions and implementations.
//!
//! The relay treats the upstream service as a black box: a JSON payload goes
//! out, a JSON document comes back. Implementations differ only in where the
//! payload is sent (Gemini, or an in-process mock for tests).

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for services that accept a `generateContent`-style payload.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Send `payload` upstream and return the parsed response body as is.
    ///
    /// Upstream error documents are returned as `Ok`; only transport failures
    /// and non-JSON bodies are errors.
    async fn generate_content(&self, payload: &Value) -> Result<Value, ProviderError>;
}
