//! Validate Curated
//!
//! Gates a curated batch: prints the report and exits non-zero when the
//! batch fails at error level.

use anyhow::Result;
use clap::Parser;
use gate_jobs::{run_validation, ValidateArgs};

fn main() -> Result<()> {
    let args = ValidateArgs::parse();
    args.logging.init()?;

    let run = run_validation(&args)?;
    println!("{}", run.report);

    run.enforce()
}
