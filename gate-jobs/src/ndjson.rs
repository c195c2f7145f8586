//! Newline-delimited JSON input and output.

use anyhow::{Context, Result};
use quality_gate::core::RecordBatch;
use quality_gate::logging::truncate_field;
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Path argument meaning stdin or stdout.
pub const STDIO: &str = "-";

const EXCERPT_LENGTH: usize = 80;

/// Parses one JSON value per line. Blank lines are skipped.
pub fn read_batch<R: BufRead>(reader: R) -> Result<RecordBatch> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_number}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: Value = serde_json::from_str(&line).with_context(|| {
            format!(
                "line {line_number}: invalid JSON: {}",
                truncate_field(line.trim(), EXCERPT_LENGTH)
            )
        })?;
        records.push(record);
    }
    Ok(RecordBatch::new(records))
}

/// Reads a batch from `path`, or from stdin when `path` is `-`.
pub fn read_path(path: &str) -> Result<RecordBatch> {
    if path == STDIO {
        return read_batch(io::stdin().lock()).context("failed to read records from stdin");
    }
    let file = File::open(Path::new(path)).with_context(|| format!("failed to open {path}"))?;
    read_batch(BufReader::new(file)).with_context(|| format!("failed to read records from {path}"))
}

/// Writes one compact JSON value per line.
pub fn write_batch<W: Write>(mut writer: W, batch: &RecordBatch) -> Result<()> {
    for record in batch {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a batch to `path`, or to stdout when `path` is `-`.
pub fn write_path(path: &str, batch: &RecordBatch) -> Result<()> {
    if path == STDIO {
        return write_batch(io::stdout().lock(), batch).context("failed to write records to stdout");
    }
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {path}"))?;
    write_batch(BufWriter::new(file), batch).with_context(|| format!("failed to write {path}"))
}
