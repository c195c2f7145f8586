//! Processing metadata attached to curated records.

use crate::core::RecordBatch;
use crate::error::{GateError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Default field name the metadata is written under.
pub const DEFAULT_METADATA_KEY: &str = "_processing";

/// Describes the job run that produced a curated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    /// Name of the job that processed the record
    pub job_name: String,
    /// Identifier of the job run
    pub run_id: String,
    /// When the record was processed
    pub processed_at: DateTime<Utc>,
    /// Where the record was read from, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ProcessingMetadata {
    /// Creates metadata stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quality_gate::metadata::ProcessingMetadata;
    ///
    /// let meta = ProcessingMetadata::new("curate-orders", "run-42").with_source("raw/orders.ndjson");
    /// assert_eq!(meta.run_id, "run-42");
    /// assert_eq!(meta.source.as_deref(), Some("raw/orders.ndjson"));
    /// ```
    pub fn new(job_name: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            run_id: run_id.into(),
            processed_at: Utc::now(),
            source: None,
        }
    }

    /// Creates metadata whose run id is derived from the processing time.
    pub fn for_job(job_name: impl Into<String>) -> Self {
        let processed_at = Utc::now();
        Self {
            job_name: job_name.into(),
            run_id: processed_at.format("%Y%m%dT%H%M%S%.3fZ").to_string(),
            processed_at,
            source: None,
        }
    }

    /// Sets the source location.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Overrides the processing time.
    pub fn with_processed_at(mut self, processed_at: DateTime<Utc>) -> Self {
        self.processed_at = processed_at;
        self
    }

    fn to_value(&self) -> Value {
        let mut object = serde_json::Map::new();
        object.insert("job_name".to_string(), Value::from(self.job_name.as_str()));
        object.insert("run_id".to_string(), Value::from(self.run_id.as_str()));
        object.insert(
            "processed_at".to_string(),
            Value::from(
                self.processed_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        );
        if let Some(source) = &self.source {
            object.insert("source".to_string(), Value::from(source.as_str()));
        }
        Value::Object(object)
    }
}

/// Writes `metadata` under `key` into every record of `batch`.
///
/// Records must be JSON objects; the first non-object record fails with
/// [`GateError::InvalidInput`] naming its zero-based position. An existing
/// member named `key` is replaced.
pub fn stamp(
    batch: RecordBatch<Value>,
    metadata: &ProcessingMetadata,
    key: &str,
) -> Result<RecordBatch<Value>> {
    if key.trim().is_empty() {
        return Err(GateError::invalid_input("metadata key must not be blank"));
    }

    let meta = metadata.to_value();
    let mut stamped = Vec::with_capacity(batch.len());
    for (position, record) in batch.into_iter().enumerate() {
        match record {
            Value::Object(mut object) => {
                object.insert(key.to_string(), meta.clone());
                stamped.push(Value::Object(object));
            }
            other => {
                return Err(GateError::invalid_input(format!(
                    "record {position} is not a JSON object (found {})",
                    json_kind(&other)
                )));
            }
        }
    }

    debug!(
        records = stamped.len(),
        metadata.key = key,
        metadata.run_id = %metadata.run_id,
        "Stamped processing metadata"
    );
    Ok(RecordBatch::new(stamped))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
