//! Example gating batches of varying quality.
//!
//! Builds four batches covering a clean load, a batch sitting exactly on the
//! threshold, one just below it and an empty one, then prints the decision
//! for each with the human and JSON formatters.
//!
//! Run with:
//! ```bash
//! cargo run --example gate_batch
//! ```

use quality_gate::prelude::*;
use quality_gate::test_fixtures::batch_with_counts;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter("quality_gate=info")
        .init();

    println!("=== Quality Gate Example ===\n");

    let gate = QualityGate::new();
    println!("Threshold: {:.2}\n", gate.threshold());

    let batches = [
        ("clean", batch_with_counts(100, 0, 0)),
        ("boundary", batch_with_counts(100, 3, 2)),
        ("below threshold", batch_with_counts(100, 3, 3)),
        ("empty", RecordBatch::empty()),
    ];

    let human = HumanFormatter::with_config(FormatterConfig::default());
    for (label, batch) in &batches {
        let decision = gate.evaluate(Some(batch))?;
        println!("--- {label} ---");
        println!("{}", human.format(&decision)?);

        match decision.enforce(Level::Error) {
            Ok(()) => println!("Load may proceed\n"),
            Err(e) => println!("Load blocked: {e}\n"),
        }
    }

    // Warning level reports the failure without blocking
    let decision = gate.evaluate(Some(&batches[2].1))?;
    decision.enforce(Level::Warning)?;
    println!("Warning level let the failing batch through\n");

    println!("JSON report:");
    let json = JsonFormatter::with_config(FormatterConfig::plain().with_label("below threshold"));
    println!("{}", json.format(&decision)?);

    Ok(())
}
