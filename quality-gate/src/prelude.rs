//! Prelude for commonly used types and traits in quality-gate.

pub use crate::config::{DuplicateKey, FieldSelection, GateConfig};
pub use crate::core::{
    decide, score, CleanseOutcome, Level, QualityDecision, QualityGate, QualityStats, Record,
    RecordBatch, DEFAULT_THRESHOLD,
};
pub use crate::error::{GateError, Result};
pub use crate::formatters::{DecisionFormatter, FormatterConfig, HumanFormatter, JsonFormatter};
pub use crate::metadata::{stamp, ProcessingMetadata, DEFAULT_METADATA_KEY};
