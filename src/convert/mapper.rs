//! Coordinate mapper for CDS (c.) and transcript (n.) numbering
//!
//! # Coordinate Systems
//!
//! | System | Basis | Notes |
//! |--------|-------|-------|
//! | Transcript (n.) | 1-based | position on the transcript sequence |
//! | CDS (c.) | 1-based | relative to the first coding base, negative for 5'UTR, `*N` for 3'UTR |
//! | `TxInfo` bounds | 0-based | `cds_start_i` is the index of c.1, `cds_end_i` the index of c.*1 |
//!
//! ## Key conversions (with `s = cds_start_i`, `e = cds_end_i`):
//! - `c.N`  (N >= 1) -> `n.(s + N)`
//! - `c.-N`          -> `n.(s - N + 1)`
//! - `c.*N`          -> `n.(e + N)`
//!
//! Intron offsets are carried through unchanged.

use crate::error::NormError;
use crate::hgvs::location::{Interval, Position};
use crate::hgvs::variant::{CoordinateType, Variant};
use crate::reference::provider::{fetch_tx_info, select_alignment, TranscriptProvider};

/// Converts variants between CDS and transcript numbering
pub trait CoordinateMapper {
    /// Convert a c. variant to n. coordinates
    fn to_transcript_nucleotide(&self, variant: &Variant) -> Result<Variant, NormError>;

    /// Convert an n. variant to c. coordinates
    fn to_cds_nucleotide(&self, variant: &Variant) -> Result<Variant, NormError>;
}

/// Maps positions using the CDS bounds from a transcript provider
pub struct CdsMapper<'a, P: TranscriptProvider + ?Sized> {
    provider: &'a P,
    alt_aln_method: &'a str,
}

impl<'a, P: TranscriptProvider + ?Sized> CdsMapper<'a, P> {
    /// Create a mapper that reads CDS bounds from the alignment chosen by `alt_aln_method`
    pub fn new(provider: &'a P, alt_aln_method: &'a str) -> Self {
        Self {
            provider,
            alt_aln_method,
        }
    }

    fn cds_bounds(&self, tx_ac: &str) -> Result<(i64, i64), NormError> {
        let alt_ac = select_alignment(self.provider, tx_ac, self.alt_aln_method)?;
        let info = fetch_tx_info(self.provider, tx_ac, &alt_ac, self.alt_aln_method)?;
        let (start, end) = info.cds().ok_or_else(|| NormError::ConversionError {
            msg: format!("{} is non-coding; c. coordinates are undefined", tx_ac),
        })?;
        Ok((start as i64, end as i64))
    }
}

/// Convert a single c. position to n. numbering
pub fn cds_to_tx_pos(pos: &Position, cds_start: i64, cds_end: i64) -> Result<Position, NormError> {
    let base = if pos.utr3 {
        cds_end + pos.base
    } else if pos.base < 0 {
        cds_start + pos.base + 1
    } else if pos.base > 0 {
        cds_start + pos.base
    } else {
        return Err(NormError::ConversionError {
            msg: "c.0 is not a valid position".to_string(),
        });
    };
    if base < 1 {
        return Err(NormError::ConversionError {
            msg: format!("c.{} lies upstream of the transcript start", pos),
        });
    }
    Ok(Position::with_offset(base, pos.offset))
}

/// Convert a single n. position to c. numbering
pub fn tx_to_cds_pos(pos: &Position, cds_start: i64, cds_end: i64) -> Position {
    let n = pos.base;
    if n <= cds_start {
        Position::with_offset(n - cds_start - 1, pos.offset)
    } else if n > cds_end {
        Position {
            base: n - cds_end,
            offset: pos.offset,
            utr3: true,
        }
    } else {
        Position::with_offset(n - cds_start, pos.offset)
    }
}

impl<P: TranscriptProvider + ?Sized> CoordinateMapper for CdsMapper<'_, P> {
    fn to_transcript_nucleotide(&self, variant: &Variant) -> Result<Variant, NormError> {
        if variant.coord_type != CoordinateType::Cds {
            return Err(NormError::ConversionError {
                msg: format!("expected a c. variant, got {}", variant),
            });
        }
        let (cds_start, cds_end) = self.cds_bounds(&variant.accession)?;
        let location = Interval::new(
            cds_to_tx_pos(&variant.location.start, cds_start, cds_end)?,
            cds_to_tx_pos(&variant.location.end, cds_start, cds_end)?,
        );
        Ok(variant.with_coordinates(CoordinateType::Tx, location))
    }

    fn to_cds_nucleotide(&self, variant: &Variant) -> Result<Variant, NormError> {
        if variant.coord_type != CoordinateType::Tx {
            return Err(NormError::ConversionError {
                msg: format!("expected an n. variant, got {}", variant),
            });
        }
        let (cds_start, cds_end) = self.cds_bounds(&variant.accession)?;
        let location = Interval::new(
            tx_to_cds_pos(&variant.location.start, cds_start, cds_end),
            tx_to_cds_pos(&variant.location.end, cds_start, cds_end),
        );
        Ok(variant.with_coordinates(CoordinateType::Cds, location))
    }
}
