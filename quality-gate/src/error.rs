//! Error types for the quality gate.
//!
//! All fallible operations in this crate return [`GateError`]. A failing
//! quality score is *not* an error on its own: [`crate::core::decide`] reports it
//! through `passed = false`, and only [`crate::core::QualityDecision::enforce`]
//! turns it into [`GateError::QualityBelowThreshold`].

use thiserror::Error;

/// The main error type for the quality gate.
#[derive(Error, Debug)]
pub enum GateError {
    /// The input handed to the gate cannot be used, e.g. the batch is unavailable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A batch scored below the configured threshold and the policy is to fail.
    #[error(
        "Quality score {score} is below threshold {threshold:.4} (total: {total}, nulls: {nulls}, duplicates: {duplicates})"
    )]
    QualityBelowThreshold {
        /// Rendered score, or `undefined` for an empty batch
        score: String,
        /// Threshold the batch was measured against
        threshold: f64,
        /// Records in the batch
        total: u64,
        /// Records with absent or empty quality-relevant fields
        nulls: u64,
        /// Records repeating an earlier record
        duplicates: u64,
    },

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A type alias for `Result<T, GateError>`.
pub type Result<T> = std::result::Result<T, GateError>;

impl GateError {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if this error reports a batch failing the quality gate.
    pub fn is_quality_failure(&self) -> bool {
        matches!(self, GateError::QualityBelowThreshold { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = GateError::invalid_input("record batch is unavailable");
        assert_eq!(err.to_string(), "Invalid input: record batch is unavailable");
        assert!(!err.is_quality_failure());
    }

    #[test]
    fn test_quality_below_threshold_message() {
        let err = GateError::QualityBelowThreshold {
            score: "0.9400".to_string(),
            threshold: 0.95,
            total: 100,
            nulls: 3,
            duplicates: 3,
        };
        assert_eq!(
            err.to_string(),
            "Quality score 0.9400 is below threshold 0.9500 (total: 100, nulls: 3, duplicates: 3)"
        );
        assert!(err.is_quality_failure());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: GateError = parse_err.into();
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
