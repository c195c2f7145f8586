//! Quality scoring and the pass/fail decision.

use super::{Level, QualityStats};
use crate::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Minimum passing score used when no override is supplied.
pub const DEFAULT_THRESHOLD: f64 = 0.95;

/// Computes `(total - nulls - duplicates) / total`.
///
/// Returns `None` for an empty batch, where the score is undefined. The
/// result is negative when enough records are counted as both null and
/// duplicate.
///
/// # Examples
///
/// ```rust
/// use quality_gate::core::{score, QualityStats};
///
/// let stats = QualityStats::new(100, 3, 2).unwrap();
/// assert_eq!(score(&stats), Some(0.95));
/// assert_eq!(score(&QualityStats::empty()), None);
/// ```
pub fn score(stats: &QualityStats) -> Option<f64> {
    if stats.total_count() == 0 {
        return None;
    }
    let total = stats.total_count() as f64;
    Some((total - stats.null_count() as f64 - stats.duplicate_count() as f64) / total)
}

/// Derives the gate decision for `stats` against `threshold`.
///
/// `passed` requires a non-empty batch and a score at or above the threshold.
///
/// # Examples
///
/// ```rust
/// use quality_gate::core::{decide, QualityStats, DEFAULT_THRESHOLD};
///
/// let boundary = decide(&QualityStats::new(100, 3, 2).unwrap(), DEFAULT_THRESHOLD);
/// assert!(boundary.passed);
///
/// let below = decide(&QualityStats::new(100, 3, 3).unwrap(), DEFAULT_THRESHOLD);
/// assert!(!below.passed);
///
/// let empty = decide(&QualityStats::empty(), DEFAULT_THRESHOLD);
/// assert!(!empty.passed);
/// assert!(empty.score.is_none());
/// ```
pub fn decide(stats: &QualityStats, threshold: f64) -> QualityDecision {
    let score = score(stats);
    let passed = matches!(score, Some(s) if s >= threshold);
    QualityDecision {
        stats: *stats,
        score,
        threshold,
        passed,
    }
}

/// Outcome of gating one batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityDecision {
    /// Statistics the decision was derived from
    pub stats: QualityStats,
    /// Quality score, `None` when the batch was empty
    pub score: Option<f64>,
    /// Threshold the score was compared with
    pub threshold: f64,
    /// Whether the batch may proceed
    pub passed: bool,
}

impl QualityDecision {
    /// Returns true if the batch passed the gate.
    pub fn is_passed(&self) -> bool {
        self.passed
    }

    /// Returns true if the batch failed the gate.
    pub fn is_failed(&self) -> bool {
        !self.passed
    }

    /// Score rendered with four decimals, or `undefined` for an empty batch.
    pub fn score_display(&self) -> String {
        match self.score {
            Some(score) => format!("{score:.4}"),
            None => "undefined".to_string(),
        }
    }

    /// Explains why the batch failed, or `None` if it passed.
    pub fn failure_reason(&self) -> Option<String> {
        if self.passed {
            return None;
        }
        Some(match self.score {
            None => "batch contains no records; quality score is undefined".to_string(),
            Some(score) => format!(
                "quality score {score:.4} is below threshold {:.4}",
                self.threshold
            ),
        })
    }

    /// Converts a failing decision into an error.
    pub fn into_result(self) -> Result<Self> {
        if self.passed {
            Ok(self)
        } else {
            Err(self.to_error())
        }
    }

    /// Applies the escalation policy for `level`.
    ///
    /// A passing decision is always `Ok`. A failing one is an error at
    /// [`Level::Error`] and is only logged at lower levels.
    pub fn enforce(&self, level: Level) -> Result<()> {
        if self.passed {
            return Ok(());
        }
        let reason = self.failure_reason().unwrap_or_default();
        match level {
            Level::Error => Err(self.to_error()),
            Level::Warning => {
                warn!(
                    stats.total = self.stats.total_count(),
                    stats.nulls = self.stats.null_count(),
                    stats.duplicates = self.stats.duplicate_count(),
                    threshold = self.threshold,
                    "Quality gate failed, continuing: {reason}"
                );
                Ok(())
            }
            Level::Info => {
                info!(
                    stats.total = self.stats.total_count(),
                    stats.nulls = self.stats.null_count(),
                    stats.duplicates = self.stats.duplicate_count(),
                    threshold = self.threshold,
                    "Quality gate failed, continuing: {reason}"
                );
                Ok(())
            }
        }
    }

    fn to_error(&self) -> GateError {
        GateError::QualityBelowThreshold {
            score: self.score_display(),
            threshold: self.threshold,
            total: self.stats.total_count(),
            nulls: self.stats.null_count(),
            duplicates: self.stats.duplicate_count(),
        }
    }
}
