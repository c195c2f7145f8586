//! Example of a curation stage followed by a validation stage.
//!
//! Raw orders arrive with missing customers, blank emails and replayed
//! events. The curation stage removes them and stamps processing metadata;
//! the validation stage then gates the curated batch with a strict threshold.
//!
//! Run with:
//! ```bash
//! cargo run --example curate_and_gate
//! ```

use chrono::{TimeZone, Utc};
use quality_gate::prelude::*;
use serde_json::{json, Value};

fn raw_orders() -> RecordBatch {
    let mut records: Vec<Value> = (0..20)
        .map(|id| {
            json!({
                "order_id": id,
                "customer": format!("customer-{}", id % 7),
                "email": format!("customer{}@example.com", id % 7),
                "amount": 10 + id,
            })
        })
        .collect();

    records.push(json!({"order_id": 20, "customer": null, "email": "x@example.com", "amount": 5}));
    records.push(json!({"order_id": 21, "customer": "customer-1", "email": "   ", "amount": 7}));
    // Replayed events with a fresh ingestion amount
    records.push(json!({"order_id": 3, "customer": "customer-3", "email": "customer3@example.com", "amount": 99}));
    records.push(records[4].clone());

    RecordBatch::new(records)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter("quality_gate=debug")
        .init();

    println!("=== Curate and Gate Example ===\n");

    let config = GateConfig::strict()
        .with_null_fields(FieldSelection::fields(["customer", "email"]))
        .with_duplicate_key(DuplicateKey::fields(["order_id"]));
    let gate = QualityGate::with_config(config)?;

    let raw = raw_orders();
    let before = gate.evaluate(Some(&raw))?;
    println!("Raw batch: {}", before.stats);
    println!("Raw score: {}\n", before.score_display());

    let outcome = gate.cleanse(Some(raw))?;
    println!(
        "Curation removed {} null and {} duplicate records ({} kept)",
        outcome.removed_nulls,
        outcome.removed_duplicates,
        outcome.records.len()
    );

    let metadata = ProcessingMetadata::new("curate-orders", "2024-06-01-run-1")
        .with_source("raw/orders/2024-06-01.ndjson")
        .with_processed_at(Utc.with_ymd_and_hms(2024, 6, 1, 2, 0, 0).unwrap());
    let curated = stamp(outcome.records, &metadata, DEFAULT_METADATA_KEY)?;

    if let Some(first) = curated.iter().next() {
        println!("First curated record:\n{}\n", serde_json::to_string_pretty(first)?);
    }

    let after = gate.evaluate(Some(&curated))?;
    let report = HumanFormatter::with_config(FormatterConfig::default().with_label("curated orders"));
    println!("{}", report.format(&after)?);

    after.enforce(Level::Error)?;
    println!("\nCurated batch accepted");
    Ok(())
}
