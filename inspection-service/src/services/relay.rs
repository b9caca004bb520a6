//! Analysis relay: prompt augmentation plus passthrough forwarding.

use super::prompt::build_system_instruction;
use super::providers::{InferenceProvider, ProviderError};
use super::TrainingStore;
use serde_json::{json, Value};
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;

/// Payload field the instruction is written to.
pub const SYSTEM_INSTRUCTION_FIELD: &str = "systemInstruction";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("analysis payload must be a JSON object")]
    InvalidPayload,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            invalid @ RelayError::InvalidPayload => {
                AppError::BadRequest(anyhow::anyhow!(invalid.to_string()))
            }
            RelayError::Provider(e) => AppError::UpstreamError(e.to_string()),
        }
    }
}

pub struct RelayService {
    store: Arc<TrainingStore>,
    provider: Arc<dyn InferenceProvider>,
    example_limit: usize,
}

impl RelayService {
    pub fn new(
        store: Arc<TrainingStore>,
        provider: Arc<dyn InferenceProvider>,
        example_limit: usize,
    ) -> Self {
        Self {
            store,
            provider,
            example_limit,
        }
    }

    /// Augment `payload` with the current system instruction and forward it.
    pub async fn analyze(&self, mut payload: Value) -> Result<Value, RelayError> {
        let examples = self.store.recent(self.example_limit).await;
        let instruction = build_system_instruction(&examples);
        inject_system_instruction(&mut payload, &instruction)?;

        tracing::info!(
            provider = self.provider.name(),
            examples = examples.len(),
            instruction_len = instruction.len(),
            "Forwarding analysis request"
        );

        let response = self.provider.generate_content(&payload).await?;
        Ok(response)
    }
}

/// Overwrite the payload's system instruction with `instruction`.
pub fn inject_system_instruction(payload: &mut Value, instruction: &str) -> Result<(), RelayError> {
    let object = payload.as_object_mut().ok_or(RelayError::InvalidPayload)?;
    object.insert(
        SYSTEM_INSTRUCTION_FIELD.to_string(),
        json!({ "parts": [{ "text": instruction }] }),
    );
    Ok(())
}
