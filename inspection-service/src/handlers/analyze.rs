use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::Value;
use service_core::error::AppError;
use service_core::extract::AppJson;

/// Relay an analysis request upstream and pass the response body through.
pub async fn analyze(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.relay.analyze(payload).await.map_err(|e| {
        tracing::error!(error = %e, "Analysis relay failed");
        AppError::from(e)
    })?;

    Ok(Json(response))
}
