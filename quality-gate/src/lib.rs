//! # quality-gate - record-level data quality gating
//!
//! `quality-gate` scores a batch of records by how many of them are null or
//! duplicated and decides whether the batch may move on to the next ETL stage.
//! It performs no I/O and depends on no execution engine: records arrive as an
//! in-memory [`RecordBatch`](core::RecordBatch) from whatever reader the
//! surrounding job uses.
//!
//! ## Quick Start
//!
//! ```rust
//! use quality_gate::prelude::*;
//! use serde_json::json;
//!
//! # fn example() -> quality_gate::error::Result<()> {
//! let gate = QualityGate::with_config(
//!     GateConfig::new()
//!         .with_null_fields(FieldSelection::fields(["order_id", "amount"]))
//!         .with_duplicate_key(DuplicateKey::fields(["order_id"])),
//! )?;
//!
//! let batch = RecordBatch::new(vec![
//!     json!({"order_id": 1, "amount": 9.5}),
//!     json!({"order_id": 2, "amount": null}),
//! ]);
//!
//! let decision = gate.evaluate(Some(&batch))?;
//! println!("{}", HumanFormatter::new().format(&decision)?);
//!
//! // Fail the enclosing job when the batch is below threshold.
//! if let Err(err) = decision.enforce(Level::Error) {
//!     eprintln!("{err}");
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Scoring
//!
//! ```text
//! score = (total - nulls - duplicates) / total
//! passed = total > 0 && score >= threshold     (threshold defaults to 0.95)
//! ```
//!
//! An empty batch has no score and never passes. A record can be both null
//! and a duplicate, in which case it is counted twice and the score can drop
//! below zero.
//!
//! ## Curation
//!
//! [`QualityGate::cleanse`](core::QualityGate::cleanse) removes the records the
//! gate would flag, and [`metadata::stamp`] attaches [`metadata::ProcessingMetadata`]
//! to each surviving record, mirroring the curation step that precedes
//! validation.
//!
//! ## Architecture
//!
//! - **`core`**: records, statistics, scoring, the gate and escalation levels
//! - **`config`**: null field selection, duplicate keys and threshold
//! - **`metadata`**: processing metadata for curated records
//! - **`formatters`**: human and JSON reports
//! - **`logging`**: subscriber setup for binaries

pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod metadata;
pub mod prelude;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
