// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-norm CLI
//!
//! Command-line interface for boundary-aware HGVS variant normalization.

use clap::{Parser, Subcommand};
use ferro_norm::cli::{normalize_line, normalize_lines, BatchSummary, OutputFormat};
use ferro_norm::config::{CliOverrides, FileConfig};
use ferro_norm::{MockProvider, Normalizer, ShuffleDirection};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "ferro-norm")]
#[command(author, version, about = "Boundary-aware HGVS variant normalizer")]
#[command(long_about = "Shift HGVS variants to their 3'-most (or 5'-most) equivalent position
without crossing exon-intron or UTR-CDS boundaries.

Variants are read as JSON, one per line.

Examples:
  ferro-norm normalize --reference ref.json -i variants.jsonl
  ferro-norm normalize --reference ref.json --direction 5prime '{...}'
  cat variants.jsonl | ferro-norm normalize --reference ref.json -f json
  ferro-norm config")]
struct Cli {
    /// Configuration file (default: ./.ferro-norm.toml, then ~/.config/ferro/norm.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. info or ferro_norm=debug (default: RUST_LOG, then warn)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize variants
    Normalize {
        /// JSON-encoded variant to normalize
        variant: Option<String>,

        /// Input file (one JSON variant per line, default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Reference data document (JSON sequences and transcripts)
        #[arg(short, long)]
        reference: PathBuf,

        /// Shuffle direction (3prime or 5prime)
        #[arg(long)]
        direction: Option<ShuffleDirection>,

        /// Allow shuffling across exon-intron and UTR-CDS boundaries
        #[arg(long)]
        cross_boundaries: bool,

        /// Omit literal reference sequence from del/delins/dup output
        #[arg(long)]
        no_fill: bool,

        /// Transcript alignment method (default: splign)
        #[arg(long)]
        alt_aln_method: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(level: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| format!("Invalid log level '{}': {}", level, e))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let file_config = FileConfig::load(cli.config.as_deref())?;
    let level = cli
        .log_level
        .as_deref()
        .or(file_config.logging.level.as_deref());
    init_tracing(level)?;

    match cli.command {
        Commands::Normalize {
            variant,
            input,
            output,
            format,
            reference,
            direction,
            cross_boundaries,
            no_fill,
            alt_aln_method,
        } => {
            let overrides = CliOverrides {
                direction,
                cross_boundaries,
                no_fill,
                alt_aln_method,
            };
            run_normalize(
                &file_config,
                &overrides,
                variant.as_deref(),
                input.as_deref(),
                output.as_deref(),
                format.parse().unwrap_or_default(),
                &reference,
            )
        }
        Commands::Config => {
            print!("{}", file_config.to_toml()?);
            Ok(())
        }
    }
}

fn run_normalize(
    file_config: &FileConfig,
    overrides: &CliOverrides,
    variant: Option<&str>,
    input: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
    reference: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = file_config.merge_with_cli(overrides);
    debug!(?config, "normalization settings");

    let provider = MockProvider::from_json(reference)?;
    let normalizer = Normalizer::with_config(provider, config);

    // Create output writer - either file or stdout
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    let stderr = io::stderr();
    let mut errors = stderr.lock();

    let summary = if let Some(v) = variant {
        let ok = normalize_line(&normalizer, v.trim(), &mut writer, &mut errors, format, None)?;
        writer.flush()?;
        BatchSummary {
            total: 1,
            succeeded: usize::from(ok),
            failed: usize::from(!ok),
        }
    } else if let Some(input_path) = input {
        let reader = BufReader::new(File::open(input_path)?);
        normalize_lines(&normalizer, reader, &mut writer, &mut errors, format)?
    } else {
        let stdin = io::stdin();
        normalize_lines(&normalizer, stdin.lock(), &mut writer, &mut errors, format)?
    };

    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "normalization finished"
    );

    if summary.failed > 0 {
        Err(format!("{} variant(s) failed to normalize", summary.failed).into())
    } else {
        Ok(())
    }
}
