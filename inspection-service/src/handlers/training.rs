use crate::models::{TrainingRecord, TrainingSubmission};
use crate::services::training_store::StoreError;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use service_core::error::AppError;
use service_core::extract::AppJson;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingResponse {
    pub success: bool,
    pub message: String,
    pub total_entries: usize,
}

pub async fn submit_training(
    State(state): State<AppState>,
    AppJson(submission): AppJson<TrainingSubmission>,
) -> Result<impl IntoResponse, AppError> {
    let total_entries = state.store.insert(submission).await.map_err(|e| {
        match &e {
            StoreError::Validation(_) => {
                tracing::warn!(error = %e, "Rejected training submission")
            }
            _ => tracing::error!(error = %e, "Failed to save training record"),
        }
        AppError::from(e)
    })?;

    Ok(Json(TrainingResponse {
        success: true,
        message: "Training data saved successfully".to_string(),
        total_entries,
    }))
}

pub async fn training_history(State(state): State<AppState>) -> Json<Vec<TrainingRecord>> {
    Json(state.store.list().await)
}

pub async fn delete_training(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let total_entries = state.store.delete(&id).await.map_err(|e| {
        tracing::error!(record_id = %id, error = %e, "Failed to delete training record");
        AppError::from(e)
    })?;

    Ok(Json(TrainingResponse {
        success: true,
        message: "Training entry deleted".to_string(),
        total_entries,
    }))
}
