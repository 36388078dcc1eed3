// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-norm: boundary-aware HGVS variant normalizer
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Variants are shifted to their 3'-most (or 5'-most) equivalent position
//! without crossing exon-intron or UTR-CDS boundaries, and rewritten as the
//! minimal edit at the new position (an insertion of repeated sequence becomes
//! a duplication, a delins sharing flanks with the reference is trimmed).
//!
//! # Example
//!
//! ```
//! use ferro_norm::{Interval, MockProvider, NaEdit, Normalizer, Variant};
//!
//! // A deletion inside a run of A's
//! let variant = Variant::genomic(
//!     "NC_000001.11",
//!     Interval::bases(13, 13),
//!     NaEdit::Deletion { reference: None },
//! );
//!
//! // Create a normalizer with test data
//! let provider = MockProvider::with_test_data();
//! let normalizer = Normalizer::new(provider);
//!
//! // Normalize the variant
//! let normalized = normalizer.normalize(&variant).unwrap();
//! assert_eq!(normalized.to_string(), "NC_000001.11:g.15delA");
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod hgvs;
pub mod normalize;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod reference;

// Re-export commonly used types
pub use error::{ErrorCode, NormError};
pub use hgvs::{CoordinateType, Interval, NaEdit, Position, Variant};
pub use normalize::{NormalizeConfig, Normalizer, ShuffleDirection};
pub use reference::{DataProvider, MockProvider, SequenceProvider, TranscriptProvider};

/// Result type alias for ferro-norm operations
pub type Result<T> = std::result::Result<T, NormError>;
