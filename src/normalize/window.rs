//! Boundary-clipped reference fetches
//!
//! Every reference read made while normalizing one variant goes through a
//! [`WindowFetcher`], so no fetch can leave the resolved [`Boundary`].

use crate::error::NormError;
use crate::normalize::boundary::Boundary;
use crate::reference::provider::SequenceProvider;

/// Fetches reference windows for one accession, clipped to a boundary
pub struct WindowFetcher<'a, P: SequenceProvider + ?Sized> {
    provider: &'a P,
    accession: &'a str,
    boundary: Boundary,
}

impl<'a, P: SequenceProvider + ?Sized> WindowFetcher<'a, P> {
    pub fn new(provider: &'a P, accession: &'a str, boundary: Boundary) -> Self {
        Self {
            provider,
            accession,
            boundary,
        }
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn accession(&self) -> &str {
        self.accession
    }

    /// Fetch the 0-based half-open range `[start, end)`
    ///
    /// The range is clipped to the boundary first; an empty range after
    /// clipping returns an empty string without touching the provider.
    pub fn fetch(&self, start: i64, end: i64) -> Result<String, NormError> {
        let left = i64::try_from(self.boundary.left).unwrap_or(i64::MAX);
        let right = i64::try_from(self.boundary.right).unwrap_or(i64::MAX);
        let start = start.max(left);
        let end = end.min(right);
        if start >= end {
            return Ok(String::new());
        }
        log::trace!("fetch {}:[{}, {})", self.accession, start, end);
        // both ends are >= left >= 0 here
        self.provider
            .fetch_seq(self.accession, start as u64, end as u64)
    }
}
