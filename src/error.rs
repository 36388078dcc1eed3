//! Error types for ferro-norm
//!
//! Normalization fails in three ways that callers are expected to tell apart:
//! - [`NormError::DataUnavailable`]: sequence or transcript metadata could not be retrieved
//! - [`NormError::Validation`]: a stated reference allele disagrees with the reference
//! - [`NormError::UnsupportedOperation`]: the variant is outside what can be normalized
//!
//! The remaining variants cover coordinate conversion, configuration and I/O.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Data errors (E2xxx)
    /// Sequence, transcript or alignment data not available
    DataUnavailable = 2001,

    // Validation errors (E3xxx)
    /// Stated reference allele disagrees with the reference sequence
    ReferenceMismatch = 3001,
    /// Allele contains characters outside the nucleotide alphabet
    InvalidSequence = 3002,
    /// Position range is malformed (end before start, position before 1)
    InvalidPosition = 3003,

    // Normalization errors (E4xxx)
    /// Variant type or position cannot be normalized
    UnsupportedOperation = 4001,

    // Conversion errors (E5xxx)
    /// Coordinate conversion failed
    ConversionFailed = 5001,

    // Configuration and IO errors (E9xxx)
    /// Invalid configuration
    ConfigError = 9000,
    /// File IO error
    IoError = 9001,
    /// JSON parsing error
    JsonError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E2001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::DataUnavailable => "reference data not available",
            ErrorCode::ReferenceMismatch => "reference sequence mismatch",
            ErrorCode::InvalidSequence => "invalid nucleotide sequence",
            ErrorCode::InvalidPosition => "invalid position range",
            ErrorCode::UnsupportedOperation => "unsupported normalization",
            ErrorCode::ConversionFailed => "coordinate conversion failed",
            ErrorCode::ConfigError => "invalid configuration",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON parsing error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-norm operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormError {
    /// Required sequence or transcript metadata could not be retrieved
    #[error("Data not available for {accession}: {msg}")]
    DataUnavailable { accession: String, msg: String },

    /// The variant's reference claim disagrees with the reference sequence
    #[error("Validation failed for {variant}: {msg}")]
    Validation {
        variant: String,
        msg: String,
        code: ErrorCode,
    },

    /// The variant cannot be normalized (protein, intronic, boundary-spanning)
    #[error("Unsupported operation for {variant}: {msg}")]
    UnsupportedOperation { variant: String, msg: String },

    /// Coordinate conversion error
    #[error("Coordinate conversion error: {msg}")]
    ConversionError { msg: String },

    /// Configuration error
    #[error("Configuration error: {msg}")]
    Config { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl NormError {
    /// Data for `accession` could not be retrieved
    pub fn data_unavailable(accession: impl Into<String>, msg: impl Into<String>) -> Self {
        NormError::DataUnavailable {
            accession: accession.into(),
            msg: msg.into(),
        }
    }

    /// Stated reference allele disagrees with the fetched reference
    pub fn reference_mismatch(
        variant: impl fmt::Display,
        stated: &str,
        fetched: &str,
    ) -> Self {
        NormError::Validation {
            variant: variant.to_string(),
            msg: format!(
                "variant reference ({}) does not agree with reference sequence ({})",
                stated, fetched
            ),
            code: ErrorCode::ReferenceMismatch,
        }
    }

    /// Allele contains a character outside the nucleotide alphabet
    pub fn invalid_sequence(variant: impl fmt::Display, seq: &str) -> Self {
        NormError::Validation {
            variant: variant.to_string(),
            msg: format!("'{}' is not a nucleotide sequence", seq),
            code: ErrorCode::InvalidSequence,
        }
    }

    /// Position range cannot describe a span on the reference
    pub fn invalid_position(variant: impl fmt::Display, msg: impl Into<String>) -> Self {
        NormError::Validation {
            variant: variant.to_string(),
            msg: msg.into(),
            code: ErrorCode::InvalidPosition,
        }
    }

    /// The variant cannot be normalized
    pub fn unsupported(variant: impl fmt::Display, msg: impl Into<String>) -> Self {
        NormError::UnsupportedOperation {
            variant: variant.to_string(),
            msg: msg.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            NormError::DataUnavailable { .. } => ErrorCode::DataUnavailable,
            NormError::Validation { code, .. } => *code,
            NormError::UnsupportedOperation { .. } => ErrorCode::UnsupportedOperation,
            NormError::ConversionError { .. } => ErrorCode::ConversionFailed,
            NormError::Config { .. } => ErrorCode::ConfigError,
            NormError::Io { .. } => ErrorCode::IoError,
            NormError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Whether this error is one of the deliberate scope exclusions
    pub fn is_unsupported(&self) -> bool {
        matches!(self, NormError::UnsupportedOperation { .. })
    }

    /// Error message prefixed with its code, e.g. `[E4001] Unsupported operation ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for NormError {
    fn from(err: std::io::Error) -> Self {
        NormError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for NormError {
    fn from(err: serde_json::Error) -> Self {
        NormError::Json {
            msg: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for NormError {
    fn from(err: toml::de::Error) -> Self {
        NormError::Config {
            msg: err.to_string(),
        }
    }
}
