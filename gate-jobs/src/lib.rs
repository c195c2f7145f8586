//! Curation and validation jobs for the quality gate.
//!
//! These are thin drivers standing in for the job-argument and job-control
//! side of an ETL stage: they read newline-delimited JSON, call
//! [`quality_gate`], report counts and turn a failing gate into a failing
//! process. Storage, partitioning and commit belong to whatever runs them.

use anyhow::{Context, Result};
use clap::{Args, Parser, ValueEnum};
use quality_gate::prelude::*;
use quality_gate::logging::setup::{init_logging, LoggingConfig};
use tracing::info;

pub mod ndjson;

/// Options selecting which fields the gate inspects.
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Comma-separated fields that make a record null when absent or empty
    /// (default: every field)
    #[arg(long, value_delimiter = ',')]
    pub null_fields: Vec<String>,

    /// Comma-separated fields forming the duplicate key (default: whole record)
    #[arg(long, value_delimiter = ',')]
    pub key_fields: Vec<String>,

    /// Treat whitespace-only strings as values rather than empty
    #[arg(long)]
    pub keep_blank_strings: bool,
}

impl SelectionArgs {
    /// Applies the selection on top of `config`.
    pub fn apply(&self, mut config: GateConfig) -> GateConfig {
        if !self.null_fields.is_empty() {
            config.null_fields = FieldSelection::fields(self.null_fields.iter().cloned());
        }
        if !self.key_fields.is_empty() {
            config.duplicate_key = DuplicateKey::fields(self.key_fields.iter().cloned());
        }
        if self.keep_blank_strings {
            config.blank_strings_are_null = false;
        }
        config
    }
}

/// Logging options shared by the jobs.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Log statistics at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level for everything outside the gate: trace, debug, info, warn or error
    #[arg(long, env = "QUALITY_GATE_LOG_LEVEL")]
    pub log_level: Option<tracing::Level>,
}

impl LogArgs {
    /// Builds the subscriber configuration for these options.
    pub fn logging_config(&self) -> LoggingConfig {
        let mut config = if self.verbose {
            LoggingConfig::development()
        } else {
            LoggingConfig::default()
        };
        if let Some(level) = self.log_level {
            config = config.with_level(level);
        }
        config.with_json_format(self.json_logs)
    }

    /// Installs the global subscriber. Logs go to stderr.
    pub fn init(&self) -> Result<()> {
        init_logging(self.logging_config())
            .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
    }
}

/// Report format for the validation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    #[default]
    Human,
    /// JSON document
    Json,
}

/// Validate a batch of curated records against the quality threshold.
#[derive(Debug, Clone, Parser)]
#[command(name = "validate-curated", version, about)]
pub struct ValidateArgs {
    /// NDJSON file to validate, or `-` for stdin
    #[arg(short, long, default_value = ndjson::STDIO)]
    pub input: String,

    /// JSON gate configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Minimum passing score, overriding the configuration
    #[arg(short, long, env = "QUALITY_GATE_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Escalation level for a failing batch: error, warning or info
    #[arg(long)]
    pub level: Option<Level>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub logging: LogArgs,
}

impl ValidateArgs {
    /// Resolves the gate configuration: file, then selection, then overrides.
    pub fn gate_config(&self) -> Result<GateConfig> {
        let base = match &self.config {
            Some(path) => GateConfig::from_path(path)
                .with_context(|| format!("failed to load gate configuration from {path}"))?,
            None => GateConfig::default(),
        };
        let mut config = self.selection.apply(base);
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        Ok(config)
    }
}

/// Outcome of the validation job.
#[derive(Debug, Clone)]
pub struct ValidationRun {
    /// Gate decision for the batch
    pub decision: QualityDecision,
    /// Escalation level the decision is enforced at
    pub level: Level,
    /// Rendered report
    pub report: String,
}

impl ValidationRun {
    /// Fails when the decision must stop the job.
    pub fn enforce(&self) -> Result<()> {
        self.decision.enforce(self.level)?;
        Ok(())
    }
}

/// Reads the input, evaluates the gate and renders the report.
pub fn run_validation(args: &ValidateArgs) -> Result<ValidationRun> {
    let gate = QualityGate::with_config(args.gate_config()?)?;
    let batch = ndjson::read_path(&args.input)?;
    validate_batch(args, &gate, &batch)
}

/// Evaluates an already loaded batch and renders the report.
pub fn validate_batch(
    args: &ValidateArgs,
    gate: &QualityGate,
    batch: &RecordBatch,
) -> Result<ValidationRun> {
    let decision = gate.evaluate(Some(batch))?;

    let formatter_config = FormatterConfig::plain().with_label(args.input.clone());
    let report = match args.format {
        OutputFormat::Human => HumanFormatter::with_config(formatter_config).format(&decision)?,
        OutputFormat::Json => JsonFormatter::with_config(formatter_config).format(&decision)?,
    };

    Ok(ValidationRun {
        decision,
        level: gate.config().level,
        report,
    })
}

/// Remove nulls and duplicates from raw records and stamp processing metadata.
#[derive(Debug, Clone, Parser)]
#[command(name = "curate-raw", version, about)]
pub struct CurateArgs {
    /// NDJSON file with raw records, or `-` for stdin
    #[arg(short, long, default_value = ndjson::STDIO)]
    pub input: String,

    /// Destination for curated NDJSON, or `-` for stdout
    #[arg(short, long, default_value = ndjson::STDIO)]
    pub output: String,

    /// Job name recorded in the processing metadata
    #[arg(long, default_value = "curate-raw")]
    pub job_name: String,

    /// Run identifier recorded in the processing metadata (default: derived from the time)
    #[arg(long, env = "QUALITY_GATE_RUN_ID")]
    pub run_id: Option<String>,

    /// Field the processing metadata is written under
    #[arg(long, default_value = DEFAULT_METADATA_KEY)]
    pub metadata_key: String,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub logging: LogArgs,
}

/// Outcome of the curation job.
#[derive(Debug, Clone, PartialEq)]
pub struct CurationSummary {
    /// Statistics of the raw input
    pub input_stats: QualityStats,
    /// Null records dropped
    pub removed_nulls: u64,
    /// Duplicate records dropped
    pub removed_duplicates: u64,
    /// Records written
    pub written: u64,
    /// Run id stamped on the output
    pub run_id: String,
}

/// Reads raw records, cleanses and stamps them, and writes the curated batch.
pub fn run_curation(args: &CurateArgs) -> Result<CurationSummary> {
    let raw = ndjson::read_path(&args.input)?;
    let (curated, summary) = curate_batch(args, raw)?;
    ndjson::write_path(&args.output, &curated)?;
    Ok(summary)
}

/// Cleanses and stamps an already loaded batch.
///
/// The source recorded in the metadata is the input path, and is left out
/// when reading from stdin.
pub fn curate_batch(args: &CurateArgs, raw: RecordBatch) -> Result<(RecordBatch, CurationSummary)> {
    let gate = QualityGate::with_config(args.selection.apply(GateConfig::default()))?;
    let outcome = gate.cleanse(Some(raw))?;

    let mut metadata = match &args.run_id {
        Some(run_id) => ProcessingMetadata::new(args.job_name.clone(), run_id.clone()),
        None => ProcessingMetadata::for_job(args.job_name.clone()),
    };
    if args.input != ndjson::STDIO {
        metadata = metadata.with_source(args.input.clone());
    }

    let curated = stamp(outcome.records, &metadata, &args.metadata_key)?;

    let summary = CurationSummary {
        input_stats: outcome.input_stats,
        removed_nulls: outcome.removed_nulls,
        removed_duplicates: outcome.removed_duplicates,
        written: curated.len() as u64,
        run_id: metadata.run_id,
    };
    info!(
        job = %args.job_name,
        run_id = %summary.run_id,
        written = summary.written,
        "Curation finished"
    );
    Ok((curated, summary))
}
