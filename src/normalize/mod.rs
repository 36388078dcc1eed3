//! Normalization engine
//!
//! Shifts a variant to its 3'-most (or 5'-most) equivalent position without
//! leaving the exon, UTR or CDS segment it starts in, then re-derives the
//! minimal edit for the new position.
//!
//! # Coordinate Systems
//!
//! | Context | Basis | Type/Notes |
//! |---------|-------|------------|
//! | Variant positions | 1-based | `i64`; c. positions are converted to n. first |
//! | [`Boundary`] | 0-based | half-open `[left, right)` |
//! | Window fetches | 0-based | half-open, signed so they can run past 0 |
//! | Primitive offsets | 0-based | `usize` into the fetched window |
//!
//! # Pipeline
//!
//! 1. guards (uncertain edits pass through; protein and anchored intronic positions are rejected)
//! 2. c. to n. conversion
//! 3. [`boundary::resolve`]
//! 4. [`alleles::extract`]
//! 5. [`shuffle::shuffle_alleles`]
//! 6. [`classify::classify`]
//! 7. n. to c. conversion

pub mod alleles;
pub mod boundary;
pub mod classify;
pub mod config;
pub mod primitive;
pub mod shuffle;
pub mod window;

use crate::convert::{CdsMapper, CoordinateMapper};
use crate::error::NormError;
use crate::hgvs::edit::NaEdit;
use crate::hgvs::location::Interval;
use crate::hgvs::variant::{CoordinateType, Variant};
use crate::reference::provider::DataProvider;

pub use alleles::Alleles;
pub use boundary::Boundary;
pub use classify::Classification;
pub use config::{NormalizeConfig, ShuffleDirection};
pub use primitive::{AlleleShift, AlleleTrimmer, ShufflePrimitive};
pub use shuffle::ShuffleOutcome;
pub use window::WindowFetcher;

/// Main normalizer struct
pub struct Normalizer<P: DataProvider> {
    provider: P,
    config: NormalizeConfig,
    primitive: Box<dyn ShufflePrimitive>,
}

impl<P: DataProvider> Normalizer<P> {
    /// Create a new normalizer with the given data provider
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, NormalizeConfig::default())
    }

    /// Create a normalizer with custom configuration
    pub fn with_config(provider: P, config: NormalizeConfig) -> Self {
        Self {
            provider,
            config,
            primitive: Box::new(AlleleTrimmer),
        }
    }

    /// Replace the shuffle primitive
    pub fn with_primitive(mut self, primitive: impl ShufflePrimitive + 'static) -> Self {
        self.primitive = Box::new(primitive);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Normalize a variant
    ///
    /// Returns a new variant; the input is never modified. Uncertain edits are
    /// returned unchanged, as are edits whose alleles are already equal.
    pub fn normalize(&self, variant: &Variant) -> Result<Variant, NormError> {
        if variant.edit.is_uncertain() {
            return Ok(variant.clone());
        }
        if variant.coord_type == CoordinateType::Protein {
            return Err(NormError::unsupported(
                variant,
                "Unsupported normalization of protein level variants",
            ));
        }
        if variant.location.is_anchored_intronic() {
            return Err(NormError::unsupported(
                variant,
                "Unsupported normalization of intron variants at CDS and transcript level",
            ));
        }

        let mapper = CdsMapper::new(&self.provider, &self.config.alt_aln_method);
        let is_cds = variant.coord_type == CoordinateType::Cds;
        let working = if is_cds {
            mapper.to_transcript_nucleotide(variant)?
        } else {
            variant.clone()
        };
        check_range(&working)?;

        let boundary = boundary::resolve(&working, &self.config, &self.provider)?;
        let window = WindowFetcher::new(&self.provider, &working.accession, boundary);
        let alleles = alleles::extract(&working, &window)?;
        if variant.edit.is_identity() || alleles.reference == alleles.alternate {
            log::debug!("{}: nothing to shift", variant);
            return Ok(variant.clone());
        }

        let direction = self.config.shuffle_direction;
        let outcome = shuffle::shuffle_alleles(
            &working,
            alleles,
            &window,
            self.primitive.as_ref(),
            direction,
        )?;
        let classified = classify::classify(&window, &outcome, direction, self.config.fill)?;
        let normalized = working.with_location_and_edit(
            Interval::bases(classified.start, classified.end),
            classified.edit,
        );

        let normalized = if is_cds {
            mapper.to_cds_nucleotide(&normalized)?
        } else {
            normalized
        };
        log::debug!("{} -> {} (boundary {})", variant, normalized, boundary);
        Ok(normalized)
    }

    /// Normalize every variant, preserving input order
    pub fn normalize_all(&self, variants: &[Variant]) -> Vec<Result<Variant, NormError>> {
        variants.iter().map(|v| self.normalize(v)).collect()
    }
}

/// Reject ranges that cannot address the reference
///
/// An insertion names the two bases around its gap, so `g.0_1` (before the
/// first base) is accepted but the pair must be adjacent.
fn check_range(variant: &Variant) -> Result<(), NormError> {
    let start = variant.location.start.base;
    let end = variant.location.end.base;
    if let NaEdit::Insertion { .. } = variant.edit {
        if start < 0 {
            return Err(NormError::invalid_position(
                variant,
                format!("insertion after position {} precedes the sequence start", start),
            ));
        }
        if end != start + 1 {
            return Err(NormError::invalid_position(
                variant,
                format!("insertion flanks {} and {} are not adjacent", start, end),
            ));
        }
        return Ok(());
    }
    if start < 1 {
        return Err(NormError::invalid_position(
            variant,
            format!("position {} precedes the sequence start", start),
        ));
    }
    if end < start {
        return Err(NormError::invalid_position(
            variant,
            format!("end {} precedes start {}", end, start),
        ));
    }
    Ok(())
}
