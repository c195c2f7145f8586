//! Batch fixtures with controlled null and duplicate counts.
//!
//! Records are JSON objects of the form `{"id": n, "name": "name-n", "email": ...}`.
//! With the default gate configuration the generated batches produce exactly
//! the requested counts, which makes them convenient for tests, benches and
//! demos.

use crate::core::RecordBatch;
use serde_json::{json, Value};

/// Builds a clean record with a unique id.
pub fn clean_record(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("name-{id}"),
        "email": format!("user{id}@example.com"),
    })
}

/// Builds a record with a null `email` and a unique id.
pub fn null_record(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("name-{id}"),
        "email": null,
    })
}

/// Builds a batch with exactly `nulls` null records and `duplicates`
/// duplicate records out of `total`.
///
/// Null records carry unique ids, so none of them is also a duplicate.
/// Duplicates repeat the clean records in round-robin order.
///
/// # Panics
///
/// Panics if `nulls + duplicates > total` or if duplicates are requested
/// without any clean record left to repeat.
pub fn batch_with_counts(total: u64, nulls: u64, duplicates: u64) -> RecordBatch {
    assert!(
        nulls + duplicates <= total,
        "nulls ({nulls}) + duplicates ({duplicates}) exceed total ({total})"
    );
    let clean = total - nulls - duplicates;
    assert!(
        duplicates == 0 || clean > 0,
        "duplicates need at least one clean record to repeat"
    );

    let mut records: Vec<Value> = (0..clean).map(clean_record).collect();
    records.extend((0..nulls).map(|i| null_record(clean + i)));
    records.extend((0..duplicates).map(|i| clean_record(i % clean.max(1))));
    RecordBatch::new(records)
}

/// Builds a batch where one record is both null and a duplicate.
pub fn double_flagged_batch() -> RecordBatch {
    RecordBatch::new(vec![clean_record(0), null_record(1), null_record(1)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QualityGate;

    #[test]
    fn test_batch_with_counts_matches_gate_statistics() {
        let gate = QualityGate::new();
        for (total, nulls, duplicates) in [(100, 3, 2), (10, 0, 0), (5, 5, 0), (7, 0, 6), (0, 0, 0)] {
            let batch = batch_with_counts(total, nulls, duplicates);
            let stats = gate.compute_stats(Some(&batch)).unwrap();
            assert_eq!(
                (stats.total_count(), stats.null_count(), stats.duplicate_count()),
                (total, nulls, duplicates)
            );
        }
    }

    #[test]
    fn test_double_flagged_batch() {
        let stats = QualityGate::new()
            .compute_stats(Some(&double_flagged_batch()))
            .unwrap();
        assert_eq!(stats.null_count(), 2);
        assert_eq!(stats.duplicate_count(), 1);
    }

    #[test]
    #[should_panic(expected = "exceed total")]
    fn test_batch_with_counts_rejects_excess() {
        batch_with_counts(3, 2, 2);
    }
}
