//! Property-based tests for scoring, statistics and cleansing.
//!
//! ## Test Categories
//!
//! ### 1. Scoring
//! - Empty batches never pass and have no score
//! - Flawless batches score exactly 1.0
//! - Raising the null or duplicate count never raises the score
//!
//! ### 2. Statistics
//! - Counts stay within the total
//! - Computing statistics twice on the same batch gives the same answer
//!
//! ### 3. Cleansing
//! - Cleansed output has no nulls and no duplicates
//! - Every input record is either kept or accounted for as removed

use proptest::prelude::*;
use quality_gate::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Generators
// ============================================================================

/// Generates stats satisfying `null <= total` and `duplicate <= total`.
fn arb_stats() -> impl Strategy<Value = QualityStats> {
    (0u64..10_000).prop_flat_map(|total| {
        (Just(total), 0..=total, 0..=total)
            .prop_map(|(t, n, d)| QualityStats::new(t, n, d).unwrap())
    })
}

/// Generates records drawn from a small id space so duplicates are common,
/// with an optional null `name`.
fn arb_record() -> impl Strategy<Value = Value> {
    (0u8..8, prop::option::weighted(0.8, "[a-c]{0,2}"))
        .prop_map(|(id, name)| json!({"id": id, "name": name}))
}

fn arb_batch() -> impl Strategy<Value = RecordBatch> {
    prop::collection::vec(arb_record(), 0..64).prop_map(RecordBatch::new)
}

// ============================================================================
// Scoring properties
// ============================================================================

proptest! {
    #[test]
    fn empty_batches_never_pass(threshold in 0.0f64..=1.0) {
        let decision = decide(&QualityStats::empty(), threshold);
        prop_assert!(!decision.passed);
        prop_assert!(decision.score.is_none());
    }

    #[test]
    fn flawless_batches_score_one(total in 1u64..1_000_000, threshold in 0.0f64..=1.0) {
        let stats = QualityStats::new(total, 0, 0).unwrap();
        prop_assert_eq!(score(&stats), Some(1.0));
        prop_assert!(decide(&stats, threshold).passed);
    }

    #[test]
    fn score_is_bounded(stats in arb_stats()) {
        if let Some(s) = score(&stats) {
            prop_assert!((-1.0..=1.0).contains(&s));
        } else {
            prop_assert_eq!(stats.total_count(), 0);
        }
    }

    #[test]
    fn more_nulls_never_raise_score(stats in arb_stats(), extra in 0u64..100) {
        prop_assume!(stats.total_count() > 0);
        let nulls = (stats.null_count() + extra).min(stats.total_count());
        let worse = QualityStats::new(stats.total_count(), nulls, stats.duplicate_count()).unwrap();
        prop_assert!(score(&worse).unwrap() <= score(&stats).unwrap());
    }

    #[test]
    fn more_duplicates_never_raise_score(stats in arb_stats(), extra in 0u64..100) {
        prop_assume!(stats.total_count() > 0);
        let duplicates = (stats.duplicate_count() + extra).min(stats.total_count());
        let worse = QualityStats::new(stats.total_count(), stats.null_count(), duplicates).unwrap();
        prop_assert!(score(&worse).unwrap() <= score(&stats).unwrap());
    }

    #[test]
    fn pass_matches_threshold_comparison(stats in arb_stats(), threshold in 0.0f64..=1.0) {
        let decision = decide(&stats, threshold);
        let expected = stats.total_count() > 0 && score(&stats).unwrap() >= threshold;
        prop_assert_eq!(decision.passed, expected);
        prop_assert_eq!(decision.threshold, threshold);
        prop_assert_eq!(decision.stats, stats);
    }
}

// ============================================================================
// Statistics and cleansing properties
// ============================================================================

proptest! {
    #[test]
    fn stats_are_bounded_and_idempotent(batch in arb_batch()) {
        let gate = QualityGate::new();
        let first = gate.compute_stats(Some(&batch)).unwrap();
        let second = gate.compute_stats(Some(&batch)).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first.total_count(), batch.len() as u64);
        prop_assert!(first.null_count() <= first.total_count());
        prop_assert!(first.duplicate_count() <= first.total_count());
        prop_assert_eq!(score(&first), score(&second));
    }

    #[test]
    fn cleansed_batches_are_flawless(batch in arb_batch()) {
        let gate = QualityGate::new();
        let input_len = batch.len() as u64;
        let outcome = gate.cleanse(Some(batch)).unwrap();
        let after = gate.compute_stats(Some(&outcome.records)).unwrap();

        prop_assert_eq!(after.null_count(), 0);
        prop_assert_eq!(after.duplicate_count(), 0);
        prop_assert_eq!(after.total_count() + outcome.removed_total(), input_len);
        prop_assert_eq!(outcome.removed_nulls, outcome.input_stats.null_count());
        prop_assert!(outcome.removed_duplicates <= outcome.input_stats.duplicate_count());
        if after.total_count() > 0 {
            prop_assert_eq!(score(&after), Some(1.0));
        }
    }
}
