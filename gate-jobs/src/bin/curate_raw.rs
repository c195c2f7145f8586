//! Curate Raw
//!
//! Drops null and duplicate records from a raw batch, stamps processing
//! metadata and writes the curated batch.

use anyhow::Result;
use clap::Parser;
use gate_jobs::{run_curation, CurateArgs};

fn main() -> Result<()> {
    let args = CurateArgs::parse();
    args.logging.init()?;

    let summary = run_curation(&args)?;

    // stdout may carry the curated records
    eprintln!(
        "Curated {} of {} records (removed {} null, {} duplicate) in run {}",
        summary.written,
        summary.input_stats.total_count(),
        summary.removed_nulls,
        summary.removed_duplicates,
        summary.run_id
    );
    Ok(())
}
