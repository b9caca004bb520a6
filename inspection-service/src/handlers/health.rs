use axum::{response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

/// Static service descriptor. Does not touch the training store, so it
/// reports healthy even when the data file is unreadable.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "endpoints": {
            "analyze": "POST /analyze",
            "submitTraining": "POST /training",
            "trainingHistory": "GET /training-history",
            "deleteTraining": "DELETE /training/:id",
            "health": "GET /health"
        }
    }))
}
