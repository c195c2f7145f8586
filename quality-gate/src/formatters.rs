//! Report formatting for quality decisions.
//!
//! The job drivers print the total, null and duplicate counts of every batch
//! they gate. These formatters render a [`QualityDecision`] either for people
//! ([`HumanFormatter`]) or for machines ([`JsonFormatter`]).
//!
//! # Examples
//!
//! ```rust
//! use quality_gate::core::{decide, QualityStats};
//! use quality_gate::formatters::{DecisionFormatter, FormatterConfig, HumanFormatter};
//!
//! let decision = decide(&QualityStats::new(100, 3, 2).unwrap(), 0.95);
//! let output = HumanFormatter::with_config(FormatterConfig::plain())
//!     .format(&decision)
//!     .unwrap();
//! assert!(output.contains("Quality gate PASSED"));
//! ```

use crate::core::QualityDecision;
use crate::error::Result;
use serde::Serialize;
use std::fmt::Write;

/// Configuration options for formatting decisions.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether to use colorized output (human formatter only)
    pub use_colors: bool,
    /// Whether to include a rendering timestamp
    pub include_timestamp: bool,
    /// Optional label naming the batch or stage being gated
    pub label: Option<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            include_timestamp: true,
            label: None,
        }
    }
}

impl FormatterConfig {
    /// Creates a configuration without colours or timestamps, suited to logs and CI.
    pub fn plain() -> Self {
        Self {
            use_colors: false,
            include_timestamp: false,
            label: None,
        }
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Sets whether to include a timestamp.
    pub fn with_timestamp(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }

    /// Sets the label printed with the report.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Formats a quality decision into a string representation.
pub trait DecisionFormatter {
    /// Formats a decision.
    fn format(&self, decision: &QualityDecision) -> Result<String>;
}

/// Formats decisions as JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(flatten)]
    decision: &'a QualityDecision,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with pretty printing.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionFormatter for JsonFormatter {
    fn format(&self, decision: &QualityDecision) -> Result<String> {
        let report = JsonReport {
            label: self.config.label.as_deref(),
            timestamp: self
                .config
                .include_timestamp
                .then(|| chrono::Utc::now().to_rfc3339()),
            decision,
        };
        let output = if self.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        Ok(output)
    }
}

/// Formats decisions for console output.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a new human formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    /// Creates a new human formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionFormatter for HumanFormatter {
    fn format(&self, decision: &QualityDecision) -> Result<String> {
        let config = &self.config;
        let mut output = String::new();

        let verdict = if decision.passed { "PASSED" } else { "FAILED" };
        if config.use_colors {
            let colour = if decision.passed { "32" } else { "31" };
            writeln!(output, "\x1b[{colour}mQuality gate {verdict}\x1b[0m").unwrap();
        } else {
            writeln!(output, "Quality gate {verdict}").unwrap();
        }

        if let Some(label) = &config.label {
            writeln!(output, "Batch: {label}").unwrap();
        }
        if config.include_timestamp {
            writeln!(output, "Timestamp: {}", chrono::Utc::now().to_rfc3339()).unwrap();
        }

        let stats = &decision.stats;
        writeln!(output, "Total records: {}", stats.total_count()).unwrap();
        writeln!(output, "Null records: {}", stats.null_count()).unwrap();
        writeln!(output, "Duplicate records: {}", stats.duplicate_count()).unwrap();
        writeln!(
            output,
            "Quality score: {} (threshold {:.4})",
            decision.score_display(),
            decision.threshold
        )
        .unwrap();

        if let Some(reason) = decision.failure_reason() {
            writeln!(output, "Reason: {reason}").unwrap();
        }

        Ok(output)
    }
}
