//! File-backed store of training records.
//!
//! The whole collection lives in one JSON array, newest record first. Every
//! mutation reads the array, edits it in memory and rewrites the file, so the
//! write cost is bounded by `max_entries`. Mutations from this process are
//! serialized; another process writing the same file can still overwrite a
//! concurrent change (last writer wins).

use crate::models::{TrainingRecord, TrainingSubmission};
use chrono::Utc;
use service_core::error::AppError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid training record: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("failed to read training data from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write training data to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => AppError::ValidationError(errors),
            other => AppError::StorageError(anyhow::Error::new(other)),
        }
    }
}

pub struct TrainingStore {
    path: PathBuf,
    max_entries: usize,
    write_lock: Mutex<()>,
}

impl TrainingStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing document as an empty array if it does not exist.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|e| self.read_error(e))?;
        if exists {
            return Ok(());
        }

        self.persist(&[]).await?;
        tracing::info!(path = %self.path.display(), "Initialized empty training data file");
        Ok(())
    }

    /// Records newest first. A missing file reads as empty.
    pub async fn try_list(&self) -> Result<Vec<TrainingRecord>, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.read_error(e)),
        };

        serde_json::from_str(&raw).map_err(|e| self.read_error(e))
    }

    /// Records newest first. Unreadable or malformed state degrades to an
    /// empty list.
    pub async fn list(&self) -> Vec<TrainingRecord> {
        match self.try_list().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Training data unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// The `limit` most recent records.
    pub async fn recent(&self, limit: usize) -> Vec<TrainingRecord> {
        let mut records = self.list().await;
        records.truncate(limit);
        records
    }

    /// Validate and prepend a record, evicting the oldest past `max_entries`.
    /// Returns the number of stored records afterwards.
    pub async fn insert(&self, submission: TrainingSubmission) -> Result<usize, StoreError> {
        submission.validate()?;
        let record = submission.into_record(Utc::now());
        let record_id = record.id.clone();
        let classification = record.classification.clone();

        let _guard = self.write_lock.lock().await;
        let mut records = self.list().await;
        records.insert(0, record);

        let evicted = records.len().saturating_sub(self.max_entries);
        records.truncate(self.max_entries);
        self.persist(&records).await?;

        tracing::info!(
            record_id = %record_id,
            classification = %classification,
            total_entries = records.len(),
            evicted,
            "Stored training record"
        );

        Ok(records.len())
    }

    /// Remove the record with `id`. Deleting an unknown id is not an error.
    /// Returns the number of stored records afterwards.
    pub async fn delete(&self, id: &str) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.list().await;

        let before = records.len();
        records.retain(|record| record.id != id);
        let removed = before - records.len();
        self.persist(&records).await?;

        tracing::info!(
            record_id = %id,
            removed,
            total_entries = records.len(),
            "Deleted training record"
        );

        Ok(records.len())
    }

    /// Rewrite the whole document via a sibling temp file and rename.
    async fn persist(&self, records: &[TrainingRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records).map_err(|e| self.write_error(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_error(e))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .await
            .map_err(|e| self.write_error(e))?;
        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to replace training data file"
            );
            self.write_error(e)
        })
    }

    fn read_error(&self, source: impl Into<anyhow::Error>) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source: source.into(),
        }
    }

    fn write_error(&self, source: impl Into<anyhow::Error>) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source: source.into(),
        }
    }
}
