//! Record-level statistics for a batch.

use crate::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counts gathered from a single batch.
///
/// `null_count` and `duplicate_count` are each bounded by `total_count`. A
/// record may be counted as both null and duplicate, so their sum can exceed
/// the total. The bounds hold for every value of this type, including
/// deserialized ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawStats")]
pub struct QualityStats {
    total_count: u64,
    null_count: u64,
    duplicate_count: u64,
}

/// Unchecked wire form of [`QualityStats`].
#[derive(Deserialize)]
struct RawStats {
    total_count: u64,
    null_count: u64,
    duplicate_count: u64,
}

impl TryFrom<RawStats> for QualityStats {
    type Error = GateError;

    fn try_from(raw: RawStats) -> Result<Self> {
        Self::new(raw.total_count, raw.null_count, raw.duplicate_count)
    }
}

impl QualityStats {
    /// Creates statistics, rejecting counts that exceed the total.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quality_gate::core::QualityStats;
    ///
    /// let stats = QualityStats::new(100, 3, 2).unwrap();
    /// assert_eq!(stats.flagged_count(), 5);
    /// assert!(QualityStats::new(10, 11, 0).is_err());
    /// ```
    pub fn new(total_count: u64, null_count: u64, duplicate_count: u64) -> Result<Self> {
        let stats = Self {
            total_count,
            null_count,
            duplicate_count,
        };
        stats.validate()?;
        Ok(stats)
    }

    /// Statistics of an empty batch.
    pub fn empty() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if self.null_count > self.total_count {
            return Err(GateError::invalid_input(format!(
                "null count {} exceeds total count {}",
                self.null_count, self.total_count
            )));
        }
        if self.duplicate_count > self.total_count {
            return Err(GateError::invalid_input(format!(
                "duplicate count {} exceeds total count {}",
                self.duplicate_count, self.total_count
            )));
        }
        Ok(())
    }

    /// Number of records in the batch.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Records whose quality-relevant fields are absent or empty.
    pub fn null_count(&self) -> u64 {
        self.null_count
    }

    /// Records repeating the content (or key) of an earlier record.
    pub fn duplicate_count(&self) -> u64 {
        self.duplicate_count
    }

    /// Returns true if the batch had no records.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Null plus duplicate count. Double-flagged records are counted twice.
    pub fn flagged_count(&self) -> u64 {
        self.null_count.saturating_add(self.duplicate_count)
    }

    /// Records neither null nor duplicate, floored at zero.
    pub fn clean_count(&self) -> u64 {
        self.total_count.saturating_sub(self.flagged_count())
    }
}

impl fmt::Display for QualityStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} nulls={} duplicates={}",
            self.total_count, self.null_count, self.duplicate_count
        )
    }
}
