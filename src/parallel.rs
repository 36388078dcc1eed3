//! Parallel normalization support
//!
//! Batch variants of [`Normalizer::normalize`] using rayon. Enable with the
//! `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_norm::hgvs::{Interval, NaEdit, Variant};
//! use ferro_norm::parallel::normalize_parallel;
//! use ferro_norm::{MockProvider, Normalizer};
//!
//! let variants: Vec<Variant> = (11..=15)
//!     .map(|pos| {
//!         Variant::genomic("NC_000001.11", Interval::bases(pos, pos), NaEdit::Deletion { reference: None })
//!     })
//!     .collect();
//!
//! let normalizer = Normalizer::new(MockProvider::with_test_data());
//! let normalized = normalize_parallel(&normalizer, &variants);
//! assert_eq!(normalized.len(), variants.len());
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::error::NormError;
use crate::hgvs::variant::Variant;
use crate::normalize::Normalizer;
use crate::reference::DataProvider;

/// Normalize multiple variants in parallel
///
/// Returns a vector of results, one for each input variant.
/// Order is preserved.
pub fn normalize_parallel<P: DataProvider + Sync>(
    normalizer: &Normalizer<P>,
    variants: &[Variant],
) -> Vec<Result<Variant, NormError>> {
    variants
        .par_iter()
        .map(|v| normalizer.normalize(v))
        .collect()
}

/// Normalize multiple variants in parallel, dropping failures
pub fn normalize_parallel_ok<P: DataProvider + Sync>(
    normalizer: &Normalizer<P>,
    variants: &[Variant],
) -> Vec<Variant> {
    variants
        .par_iter()
        .filter_map(|v| normalizer.normalize(v).ok())
        .collect()
}
