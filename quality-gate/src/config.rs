//! Gate configuration.
//!
//! The source data never fixes a schema, so which fields make a record "null"
//! and what makes two records duplicates are configuration. [`GateConfig`] can
//! be built in code or deserialized from JSON:
//!
//! ```json
//! {
//!   "threshold": 0.97,
//!   "null_fields": { "fields": ["customer_id", "email"] },
//!   "duplicate_key": { "fields": ["customer_id"] },
//!   "level": "warning"
//! }
//! ```

use crate::core::{Level, DEFAULT_THRESHOLD};
use crate::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fields inspected when deciding whether a record is null.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSelection {
    /// Every field the record carries. A record with no fields is null.
    #[default]
    All,
    /// Only the named fields. A record is null if any of them is absent or empty.
    Fields(Vec<String>),
}

impl FieldSelection {
    /// Selects the given field names.
    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldSelection::Fields(names.into_iter().map(Into::into).collect())
    }
}

/// What two records must share to count as duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKey {
    /// Exact match on the whole record.
    #[default]
    FullRecord,
    /// Match on the named fields only. An absent field keys as JSON `null`.
    Fields(Vec<String>),
}

impl DuplicateKey {
    /// Keys on the given field names.
    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DuplicateKey::Fields(names.into_iter().map(Into::into).collect())
    }
}

/// Configuration for a [`QualityGate`](crate::core::QualityGate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Minimum passing score, inclusive
    pub threshold: f64,
    /// Fields that make a record null when absent or empty
    pub null_fields: FieldSelection,
    /// Whether whitespace-only strings count as empty
    pub blank_strings_are_null: bool,
    /// Key used for duplicate detection
    pub duplicate_key: DuplicateKey,
    /// Escalation policy for a failing decision
    pub level: Level,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            null_fields: FieldSelection::All,
            blank_strings_are_null: true,
            duplicate_key: DuplicateKey::FullRecord,
            level: Level::Error,
        }
    }
}

impl GateConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that only passes flawless batches.
    pub fn strict() -> Self {
        Self {
            threshold: 1.0,
            ..Self::default()
        }
    }

    /// Sets the passing threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the fields checked for nulls.
    pub fn with_null_fields(mut self, selection: FieldSelection) -> Self {
        self.null_fields = selection;
        self
    }

    /// Sets whether whitespace-only strings count as empty.
    pub fn with_blank_strings_as_null(mut self, enabled: bool) -> Self {
        self.blank_strings_are_null = enabled;
        self
    }

    /// Sets the duplicate detection key.
    pub fn with_duplicate_key(mut self, key: DuplicateKey) -> Self {
        self.duplicate_key = key;
        self
    }

    /// Sets the escalation level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Checks the threshold range and that field lists are non-empty.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(GateError::configuration(format!(
                "threshold must be a finite number between 0.0 and 1.0, got {}",
                self.threshold
            )));
        }
        if let FieldSelection::Fields(fields) = &self.null_fields {
            check_field_list("null_fields", fields)?;
        }
        if let DuplicateKey::Fields(fields) = &self.duplicate_key {
            check_field_list("duplicate_key", fields)?;
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GateConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

fn check_field_list(setting: &str, fields: &[String]) -> Result<()> {
    if fields.is_empty() {
        return Err(GateError::configuration(format!(
            "{setting} must name at least one field"
        )));
    }
    if let Some(blank) = fields.iter().find(|f| f.trim().is_empty()) {
        return Err(GateError::configuration(format!(
            "{setting} contains a blank field name: {blank:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GateConfig::default();
        assert_eq!(config.threshold, 0.95);
        assert_eq!(config.null_fields, FieldSelection::All);
        assert!(config.blank_strings_are_null);
        assert_eq!(config.duplicate_key, DuplicateKey::FullRecord);
        assert_eq!(config.level, Level::Error);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GateConfig::new()
            .with_threshold(0.9)
            .with_null_fields(FieldSelection::fields(["id", "email"]))
            .with_duplicate_key(DuplicateKey::fields(["id"]))
            .with_blank_strings_as_null(false)
            .with_level(Level::Warning);

        assert_eq!(config.threshold, 0.9);
        assert_eq!(
            config.null_fields,
            FieldSelection::Fields(vec!["id".to_string(), "email".to_string()])
        );
        assert_eq!(config.duplicate_key, DuplicateKey::Fields(vec!["id".to_string()]));
        assert!(!config.blank_strings_are_null);
        assert_eq!(config.level, Level::Warning);
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        for threshold in [f64::NAN, f64::INFINITY, -0.1, 1.01] {
            let err = GateConfig::new()
                .with_threshold(threshold)
                .validate()
                .unwrap_err();
            assert!(matches!(err, GateError::Configuration(_)), "{threshold}");
        }
        assert!(GateConfig::new().with_threshold(0.0).validate().is_ok());
        assert!(GateConfig::strict().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_field_lists() {
        let err = GateConfig::new()
            .with_null_fields(FieldSelection::Fields(vec![]))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("null_fields must name at least one field"));

        let err = GateConfig::new()
            .with_duplicate_key(DuplicateKey::fields(["id", "  "]))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("blank field name"));
    }

    #[test]
    fn test_from_json_str() {
        let config = GateConfig::from_json_str(
            r#"{
                "threshold": 0.97,
                "null_fields": {"fields": ["customer_id"]},
                "duplicate_key": "full_record",
                "level": "warning"
            }"#,
        )
        .unwrap();

        assert_eq!(config.threshold, 0.97);
        assert_eq!(config.null_fields, FieldSelection::fields(["customer_id"]));
        assert_eq!(config.duplicate_key, DuplicateKey::FullRecord);
        assert_eq!(config.level, Level::Warning);
        assert!(config.blank_strings_are_null);
    }

    #[test]
    fn test_from_json_str_empty_object_uses_defaults() {
        assert_eq!(GateConfig::from_json_str("{}").unwrap(), GateConfig::default());
    }

    #[test]
    fn test_from_json_str_rejects_unknown_fields_and_bad_values() {
        assert!(matches!(
            GateConfig::from_json_str(r#"{"treshold": 0.9}"#),
            Err(GateError::Serialization(_))
        ));
        assert!(matches!(
            GateConfig::from_json_str(r#"{"threshold": 2.0}"#),
            Err(GateError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"threshold": 0.5}}"#).unwrap();

        let config = GateConfig::from_path(file.path()).unwrap();
        assert_eq!(config.threshold, 0.5);

        assert!(matches!(
            GateConfig::from_path("/nonexistent/gate.json"),
            Err(GateError::Io(_))
        ));
    }
}
