//! Output formatting utilities for CLI operations

use crate::error::NormError;
use crate::hgvs::variant::Variant;
use serde::Serialize;
use std::io::{self, Write};
use std::str::FromStr;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string; anything but `json` is text
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_norm::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

#[derive(Serialize)]
struct OkRecord<'a> {
    input: String,
    output: String,
    status: &'static str,
    variant: &'a Variant,
}

#[derive(Serialize)]
struct ErrorRecord<'a> {
    input: &'a str,
    error: String,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    status: &'static str,
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, record: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, record)?;
    writeln!(writer)
}

/// Write a successful result to the output
///
/// Text output is `input -> output`, or just the variant when normalization
/// left it unchanged. JSON output also carries the normalized variant as a
/// structured object, so it can be fed back in.
///
/// # Examples
///
/// ```
/// use ferro_norm::cli::{output_result, OutputFormat};
/// use ferro_norm::hgvs::{Interval, NaEdit, Variant};
/// use std::io::Cursor;
///
/// let input = Variant::genomic("NC_000001.11", Interval::bases(13, 13), NaEdit::Deletion { reference: None });
/// let output = Variant::genomic("NC_000001.11", Interval::bases(15, 15), NaEdit::Deletion { reference: Some("A".into()) });
/// let mut buffer = Cursor::new(Vec::new());
/// output_result(&mut buffer, &input, &output, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert_eq!(result, "NC_000001.11:g.13del -> NC_000001.11:g.15delA\n");
/// ```
pub fn output_result<W: Write>(
    writer: &mut W,
    input: &Variant,
    output: &Variant,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(
            writer,
            &OkRecord {
                input: input.to_string(),
                output: output.to_string(),
                status: "ok",
                variant: output,
            },
        ),
        OutputFormat::Text => {
            if input == output {
                writeln!(writer, "{}", output)
            } else {
                writeln!(writer, "{} -> {}", input, output)
            }
        }
    }
}

/// Write an error to the output
pub fn output_error<W: Write>(
    writer: &mut W,
    input: &str,
    error: &NormError,
    format: OutputFormat,
) -> io::Result<()> {
    output_error_with_context(writer, input, error, format, None)
}

/// Write an error to the output with optional line number context
///
/// # Examples
///
/// ```
/// use ferro_norm::cli::{output_error_with_context, OutputFormat};
/// use ferro_norm::NormError;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let error = NormError::Json { msg: "expected value".to_string() };
/// output_error_with_context(&mut buffer, "{", &error, OutputFormat::Text, Some(42)).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.starts_with("ERROR (line 42): { - "));
/// ```
pub fn output_error_with_context<W: Write>(
    writer: &mut W,
    input: &str,
    error: &NormError,
    format: OutputFormat,
    line_number: Option<usize>,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(
            writer,
            &ErrorRecord {
                input,
                error: error.to_string(),
                code: error.code().as_str(),
                line: line_number,
                status: "error",
            },
        ),
        OutputFormat::Text => {
            if let Some(line) = line_number {
                writeln!(writer, "ERROR (line {}): {} - {}", line, input, error)
            } else {
                writeln!(writer, "ERROR: {} - {}", input, error)
            }
        }
    }
}
