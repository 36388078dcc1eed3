//! CLI utilities for ferro-norm
//!
//! This module provides testable functions used by the CLI binary.
//! Input is one JSON-encoded [`Variant`] per line; the binary only opens the
//! reader and writers and hands them to [`normalize_lines`].

pub mod format;

pub use format::{output_error, output_error_with_context, output_result, OutputFormat};

use crate::error::NormError;
use crate::hgvs::variant::Variant;
use crate::normalize::Normalizer;
use crate::reference::provider::DataProvider;
use std::io::{self, BufRead, Write};

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip UTF-8 BOM from the beginning of a string if present.
///
/// # Examples
///
/// ```
/// use ferro_norm::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}{}"), "{}");
/// assert_eq!(strip_bom("{}"), "{}");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Process an input line: trim whitespace and strip the BOM on the first line.
///
/// Returns None for blank lines and `#` comment lines. Comments are only
/// recognized at the start of a line, since `#` may occur inside JSON strings.
///
/// # Examples
///
/// ```
/// use ferro_norm::cli::process_input_line;
///
/// assert_eq!(process_input_line("  {\"a\": 1} ", false), Some("{\"a\": 1}"));
/// assert_eq!(process_input_line("\u{feff}{}", true), Some("{}"));
/// assert_eq!(process_input_line("# header", false), None);
/// assert_eq!(process_input_line("", false), None);
/// ```
pub fn process_input_line(line: &str, is_first_line: bool) -> Option<&str> {
    let line = if is_first_line { strip_bom(line) } else { line };
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        None
    } else {
        Some(line)
    }
}

/// Parse one JSON-encoded variant
pub fn parse_variant(line: &str) -> Result<Variant, NormError> {
    Ok(serde_json::from_str(line)?)
}

/// Counts from a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, ok: bool) {
        self.total += 1;
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Normalize a single input line, writing the result to `out` or the error to `err`
///
/// Returns whether normalization succeeded; only write failures are errors.
pub fn normalize_line<P, W, E>(
    normalizer: &Normalizer<P>,
    line: &str,
    out: &mut W,
    err: &mut E,
    format: OutputFormat,
    line_number: Option<usize>,
) -> io::Result<bool>
where
    P: DataProvider,
    W: Write,
    E: Write,
{
    let variant = match parse_variant(line) {
        Ok(variant) => variant,
        Err(e) => {
            output_error_with_context(err, line, &e, format, line_number)?;
            return Ok(false);
        }
    };
    match normalizer.normalize(&variant) {
        Ok(normalized) => {
            output_result(out, &variant, &normalized, format)?;
            Ok(true)
        }
        Err(e) => {
            log::debug!("{}: {}", variant, e.detailed_message());
            output_error_with_context(err, &variant.to_string(), &e, format, line_number)?;
            Ok(false)
        }
    }
}

/// Normalize every variant line of `reader`
///
/// Failures are reported per line (with 1-based line numbers) and the run
/// continues.
pub fn normalize_lines<P, R, W, E>(
    normalizer: &Normalizer<P>,
    reader: R,
    out: &mut W,
    err: &mut E,
    format: OutputFormat,
) -> Result<BatchSummary, NormError>
where
    P: DataProvider,
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = BatchSummary::default();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(input) = process_input_line(&line, line_num == 0) {
            let ok = normalize_line(normalizer, input, out, err, format, Some(line_num + 1))?;
            summary.record(ok);
        }
    }
    out.flush()?;
    Ok(summary)
}
