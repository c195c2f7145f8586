//! Escalation levels for failing quality decisions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a failing [`QualityDecision`](super::QualityDecision) is escalated.
///
/// Levels are ordered by severity: Error > Warning > Info.
///
/// - **Error**: the enclosing job must fail; [`enforce`](super::QualityDecision::enforce)
///   returns [`GateError::QualityBelowThreshold`](crate::error::GateError::QualityBelowThreshold).
/// - **Warning**: the failure is logged at `WARN` and the job continues.
/// - **Info**: the failure is logged at `INFO` and the job continues.
///
/// # Examples
///
/// ```rust
/// use quality_gate::core::Level;
///
/// assert!(Level::Error > Level::Warning);
/// assert!(Level::Warning.is_at_least(Level::Info));
/// assert_eq!("warning".parse::<Level>().unwrap(), Level::Warning);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Informational level - failures are recorded but never block
    Info = 0,
    /// Warning level - failures should be reviewed but do not block
    Warning = 1,
    /// Error level - failures abort the enclosing job
    #[default]
    Error = 2,
}

impl Level {
    /// Returns the string representation of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    /// Checks if this level is at least as severe as another level.
    pub fn is_at_least(&self, other: Level) -> bool {
        *self >= other
    }

    /// Returns true if a failing decision at this level must stop the job.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            other => Err(format!(
                "unknown level '{other}', expected one of: info, warning, error"
            )),
        }
    }
}
