use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

/// A labelled inspection example as persisted in the training document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRecord {
    pub id: String,
    /// Inline image data (base64 or data URL), stored as received.
    pub image: String,
    #[serde(default)]
    pub mime_type: String,
    pub classification: String,
    #[serde(default)]
    pub notes: String,
    /// Markers drawn by the reviewer. Opaque to the server.
    #[serde(default)]
    pub annotations: Vec<Value>,
    #[serde(default)]
    pub timestamp: String,
}

/// Body of `POST /training`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSubmission {
    pub id: Option<String>,

    #[validate(
        required(message = "image is required"),
        length(min = 1, message = "image must not be empty")
    )]
    pub image: Option<String>,

    pub mime_type: Option<String>,

    #[validate(
        required(message = "classification is required"),
        length(min = 1, message = "classification must not be empty")
    )]
    pub classification: Option<String>,

    pub notes: Option<String>,

    pub annotations: Option<Vec<Value>>,

    pub timestamp: Option<String>,
}

impl TrainingSubmission {
    /// Fill in server-side defaults. Callers validate first; an unvalidated
    /// submission yields empty `image`/`classification` rather than panicking.
    pub fn into_record(self, received_at: DateTime<Utc>) -> TrainingRecord {
        TrainingRecord {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            image: self.image.unwrap_or_default(),
            mime_type: self.mime_type.unwrap_or_default(),
            classification: self.classification.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            annotations: self.annotations.unwrap_or_default(),
            timestamp: self
                .timestamp
                .filter(|ts| !ts.is_empty())
                .unwrap_or_else(|| received_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}
