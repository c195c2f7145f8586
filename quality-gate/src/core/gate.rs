//! The quality gate: statistics, decision and cleansing for one batch.

use super::detect::{KeyRule, NullRule, SeenKeys};
use super::{decide, QualityDecision, QualityStats, Record, RecordBatch};
use crate::config::GateConfig;
use crate::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// Computes quality statistics and pass/fail decisions for record batches.
///
/// A gate holds only immutable configuration and performs no I/O, so one
/// instance can be shared across threads gating independent batches.
///
/// # Examples
///
/// ```rust
/// use quality_gate::core::{QualityGate, RecordBatch};
/// use serde_json::json;
///
/// # fn example() -> quality_gate::error::Result<()> {
/// let gate = QualityGate::new();
/// let batch = RecordBatch::new(vec![
///     json!({"id": 1, "name": "Ada"}),
///     json!({"id": 2, "name": null}),
///     json!({"id": 1, "name": "Ada"}),
/// ]);
///
/// let stats = gate.compute_stats(Some(&batch))?;
/// assert_eq!((stats.total_count(), stats.null_count(), stats.duplicate_count()), (3, 1, 1));
///
/// let decision = gate.evaluate(Some(&batch))?;
/// assert!(!decision.passed);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct QualityGate {
    config: GateConfig,
    nulls: NullRule,
    keys: KeyRule,
}

impl QualityGate {
    /// Creates a gate with the default configuration.
    pub fn new() -> Self {
        Self::build(GateConfig::default())
    }

    /// Creates a gate after validating `config`.
    pub fn with_config(config: GateConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GateConfig) -> Self {
        Self {
            nulls: NullRule::from_config(&config),
            keys: KeyRule::from_config(&config),
            config,
        }
    }

    /// Returns the gate's configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Returns the threshold decisions are made against.
    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Counts total, null and duplicate records.
    ///
    /// `None` stands for a batch the data-access layer could not provide and
    /// fails with [`GateError::InvalidInput`]. An empty batch is valid.
    #[instrument(skip_all, fields(batch.records = batch.map(RecordBatch::len)))]
    pub fn compute_stats<R: Record>(&self, batch: Option<&RecordBatch<R>>) -> Result<QualityStats> {
        let batch = require_batch(batch)?;
        let mut seen = SeenKeys::with_capacity(batch.len());
        let (mut nulls, mut duplicates) = (0u64, 0u64);

        for record in batch {
            if self.nulls.is_null(record) {
                nulls += 1;
            }
            if seen.is_repeat(self.keys.digest(record)?) {
                duplicates += 1;
            }
        }
        let stats = QualityStats::new(batch.len() as u64, nulls, duplicates)?;

        debug!(
            stats.total = stats.total_count(),
            stats.nulls = stats.null_count(),
            stats.duplicates = stats.duplicate_count(),
            stats.distinct_keys = seen.distinct(),
            "Computed batch statistics"
        );
        Ok(stats)
    }

    /// Derives the decision for precomputed statistics using the configured threshold.
    pub fn decide(&self, stats: &QualityStats) -> QualityDecision {
        decide(stats, self.config.threshold)
    }

    /// Computes statistics for `batch` and decides whether it passes.
    #[instrument(skip_all, fields(gate.threshold = self.config.threshold))]
    pub fn evaluate<R: Record>(&self, batch: Option<&RecordBatch<R>>) -> Result<QualityDecision> {
        let stats = self.compute_stats(batch)?;
        let decision = self.decide(&stats);

        info!(
            stats.total = stats.total_count(),
            stats.nulls = stats.null_count(),
            stats.duplicates = stats.duplicate_count(),
            score = %decision.score_display(),
            passed = decision.passed,
            "Quality gate evaluated"
        );
        Ok(decision)
    }

    /// Removes null records, then records repeating an earlier survivor.
    ///
    /// Surviving records keep their original order. The returned outcome also
    /// carries the statistics of the input batch.
    #[instrument(skip_all, fields(batch.records = batch.as_ref().map(RecordBatch::len)))]
    pub fn cleanse<R: Record>(&self, batch: Option<RecordBatch<R>>) -> Result<CleanseOutcome<R>> {
        let batch = batch.ok_or_else(unavailable)?;
        let input_stats = self.compute_stats(Some(&batch))?;

        let mut seen = SeenKeys::with_capacity(batch.len());
        let mut kept = Vec::with_capacity(batch.len());
        let mut removed_nulls = 0u64;
        let mut removed_duplicates = 0u64;

        for record in batch {
            if self.nulls.is_null(&record) {
                removed_nulls += 1;
                continue;
            }
            let digest = self.keys.digest(&record)?;
            if seen.is_repeat(digest) {
                trace!(key = %hex::encode(&digest[..8]), "Dropping duplicate record");
                removed_duplicates += 1;
                continue;
            }
            kept.push(record);
        }

        info!(
            input.total = input_stats.total_count(),
            removed.nulls = removed_nulls,
            removed.duplicates = removed_duplicates,
            output.total = kept.len(),
            "Cleansed batch"
        );

        Ok(CleanseOutcome {
            records: RecordBatch::new(kept),
            input_stats,
            removed_nulls,
            removed_duplicates,
        })
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new()
    }
}

fn unavailable() -> GateError {
    GateError::invalid_input("record batch is unavailable")
}

fn require_batch<R>(batch: Option<&RecordBatch<R>>) -> Result<&RecordBatch<R>> {
    batch.ok_or_else(unavailable)
}

/// Result of [`QualityGate::cleanse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanseOutcome<R = serde_json::Value> {
    /// Records that survived cleansing, in input order
    pub records: RecordBatch<R>,
    /// Statistics of the batch before cleansing
    pub input_stats: QualityStats,
    /// Null records dropped
    pub removed_nulls: u64,
    /// Non-null records dropped as repeats of an earlier survivor
    pub removed_duplicates: u64,
}

impl<R> CleanseOutcome<R> {
    /// Total number of records dropped.
    pub fn removed_total(&self) -> u64 {
        self.removed_nulls + self.removed_duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DuplicateKey, FieldSelection};
    use serde_json::{json, Value};

    fn batch(records: Vec<Value>) -> RecordBatch {
        RecordBatch::new(records)
    }

    #[test]
    fn test_unavailable_batch_is_invalid_input() {
        let gate = QualityGate::new();
        let err = gate.compute_stats::<Value>(None).unwrap_err();
        assert!(matches!(err, GateError::InvalidInput(_)));

        let err = gate.evaluate::<Value>(None).unwrap_err();
        assert!(matches!(err, GateError::InvalidInput(_)));

        let err = gate.cleanse::<Value>(None).unwrap_err();
        assert!(matches!(err, GateError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_batch_is_valid_and_fails() {
        let gate = QualityGate::new();
        let empty = batch(vec![]);

        let stats = gate.compute_stats(Some(&empty)).unwrap();
        assert_eq!(stats, QualityStats::empty());

        let decision = gate.evaluate(Some(&empty)).unwrap();
        assert!(!decision.passed);
        assert!(decision.score.is_none());
    }

    #[test]
    fn test_counts_nulls_and_duplicates() {
        let gate = QualityGate::new();
        let records = batch(vec![
            json!({"id": 1, "name": "a"}),
            json!({"id": 2, "name": "b"}),
            json!({"id": 1, "name": "a"}),
            json!({"id": 3, "name": null}),
            json!({"id": 3, "name": null}),
        ]);

        let stats = gate.compute_stats(Some(&records)).unwrap();
        assert_eq!(stats.total_count(), 5);
        assert_eq!(stats.null_count(), 2);
        assert_eq!(stats.duplicate_count(), 2);
    }

    #[test]
    fn test_first_occurrence_is_not_a_duplicate() {
        let gate = QualityGate::new();
        let records = batch(vec![json!({"id": 1}); 4]);
        let stats = gate.compute_stats(Some(&records)).unwrap();
        assert_eq!(stats.duplicate_count(), 3);
    }

    #[test]
    fn test_configured_fields_and_key() {
        let gate = QualityGate::with_config(
            GateConfig::new()
                .with_null_fields(FieldSelection::fields(["email"]))
                .with_duplicate_key(DuplicateKey::fields(["id"])),
        )
        .unwrap();

        let records = batch(vec![
            json!({"id": 1, "email": "a@x.io", "phone": null}),
            json!({"id": 1, "email": "b@x.io"}),
            json!({"id": 2}),
        ]);

        let stats = gate.compute_stats(Some(&records)).unwrap();
        assert_eq!(stats.null_count(), 1);
        assert_eq!(stats.duplicate_count(), 1);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let err = QualityGate::with_config(GateConfig::new().with_threshold(1.5)).unwrap_err();
        assert!(matches!(err, GateError::Configuration(_)));
    }

    #[test]
    fn test_evaluate_uses_configured_threshold() {
        let records = batch(vec![
            json!({"id": 1}),
            json!({"id": 2}),
            json!({"id": 3}),
            json!({"id": null}),
        ]);

        let lenient = QualityGate::with_config(GateConfig::new().with_threshold(0.75)).unwrap();
        let decision = lenient.evaluate(Some(&records)).unwrap();
        assert_eq!(decision.score, Some(0.75));
        assert!(decision.passed);

        let default_gate = QualityGate::new();
        assert!(!default_gate.evaluate(Some(&records)).unwrap().passed);
    }

    #[test]
    fn test_map_records() {
        let gate = QualityGate::new();
        let records: RecordBatch<serde_json::Map<String, Value>> = vec![
            json!({"id": 1}).as_object().unwrap().clone(),
            json!({"id": 1}).as_object().unwrap().clone(),
        ]
        .into();
        let stats = gate.compute_stats(Some(&records)).unwrap();
        assert_eq!(stats.duplicate_count(), 1);
    }

    #[test]
    fn test_cleanse_drops_nulls_then_duplicates() {
        let gate = QualityGate::new();
        let records = batch(vec![
            json!({"id": 1, "name": "a"}),
            json!({"id": 2, "name": null}),
            json!({"id": 1, "name": "a"}),
            json!({"id": 2, "name": null}),
            json!({"id": 3, "name": "c"}),
        ]);

        let outcome = gate.cleanse(Some(records)).unwrap();
        assert_eq!(
            outcome.records.records(),
            &[json!({"id": 1, "name": "a"}), json!({"id": 3, "name": "c"})]
        );
        assert_eq!(outcome.removed_nulls, 2);
        assert_eq!(outcome.removed_duplicates, 1);
        assert_eq!(outcome.removed_total(), 3);
        assert_eq!(outcome.input_stats.total_count(), 5);
        assert_eq!(outcome.input_stats.null_count(), 2);
        assert_eq!(outcome.input_stats.duplicate_count(), 2);

        let after = gate.compute_stats(Some(&outcome.records)).unwrap();
        assert_eq!(after.null_count(), 0);
        assert_eq!(after.duplicate_count(), 0);
    }

    #[test]
    fn test_gate_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QualityGate>();

        let gate = QualityGate::new();
        let batches: Vec<RecordBatch> = (0..4)
            .map(|n| batch((0..=n).map(|i| json!({"id": i})).collect()))
            .collect();

        let totals: Vec<u64> = std::thread::scope(|scope| {
            let handles: Vec<_> = batches
                .iter()
                .map(|b| {
                    let gate = &gate;
                    scope.spawn(move || gate.compute_stats(Some(b)).unwrap().total_count())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(totals, vec![1, 2, 3, 4]);
    }
}
