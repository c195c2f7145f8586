//! Core gating types.
//!
//! ## Overview
//!
//! - **[`Record`] / [`RecordBatch`]**: the in-memory records a batch is made of
//! - **[`QualityGate`]**: counts nulls and duplicates and decides pass/fail
//! - **[`QualityStats`]**: total, null and duplicate counts for one batch
//! - **[`QualityDecision`]**: score, threshold and verdict
//! - **[`Level`]**: how a failing decision is escalated
//!
//! ## Flow
//!
//! ```text
//! RecordBatch ──compute_stats──▶ QualityStats ──decide──▶ QualityDecision ──enforce(Level)──▶ Ok / Err
//!      │
//!      └──cleanse──▶ CleanseOutcome (nulls and repeats removed)
//! ```
//!
//! Scoring follows `(total - nulls - duplicates) / total`. An empty batch has
//! no score and never passes.

mod decision;
mod detect;
mod gate;
mod level;
mod record;
mod stats;

pub use decision::{decide, score, QualityDecision, DEFAULT_THRESHOLD};
pub use gate::{CleanseOutcome, QualityGate};
pub use level::Level;
pub use record::{Record, RecordBatch};
pub use stats::QualityStats;
