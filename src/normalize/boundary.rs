//! Boundary detection for normalization
//!
//! Determines the interval within which a variant can be shuffled.
//!
//! # Coordinate System
//!
//! Boundaries are **0-based half-open** `[left, right)` offsets on the
//! variant's reference sequence. Variant positions are 1-based, so every
//! comparison is made against `base - 1`.
//!
//! | Variant | Cross allowed | Boundary |
//! |---------|---------------|----------|
//! | g./m.   | either        | `[0, +inf)` |
//! | n./r.   | yes           | `[0, +inf)` |
//! | n./r.   | no            | containing exon, clamped to the CDS or UTR side |
//!
//! An insertion sits in the gap after base `start`, so it has no base of its
//! own. It is placed by one flanking base: the left one when shuffling 3',
//! the right one when shuffling 5', falling back to the other flank when the
//! preferred one lies outside every exon. A gap on an exon or CDS edge
//! therefore resolves to the segment it was shuffled within.

use crate::error::NormError;
use crate::hgvs::edit::NaEdit;
use crate::hgvs::variant::{CoordinateType, Variant};
use crate::normalize::config::{NormalizeConfig, ShuffleDirection};
use crate::reference::provider::{fetch_tx_info, select_alignment, TranscriptProvider};
use crate::reference::transcript::ExonRecord;

/// Legal shuffling interval `[left, right)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Boundary {
    /// Leftmost index (inclusive)
    pub left: u64,
    /// Rightmost index (exclusive); `u64::MAX` when unbounded
    pub right: u64,
}

impl Boundary {
    pub fn new(left: u64, right: u64) -> Self {
        debug_assert!(left <= right, "boundary left {} > right {}", left, right);
        Self { left, right }
    }

    /// The whole sequence
    pub fn unbounded() -> Self {
        Self {
            left: 0,
            right: u64::MAX,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.right == u64::MAX
    }

    /// Check if a 0-based index lies within `[left, right)`
    pub fn contains(&self, pos: u64) -> bool {
        pos >= self.left && pos < self.right
    }
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unbounded() {
            write!(f, "[{}, inf)", self.left)
        } else {
            write!(f, "[{}, {})", self.left, self.right)
        }
    }
}

/// Compute the shuffling boundary for a variant
///
/// CDS variants must already be converted to transcript coordinates.
pub fn resolve<P: TranscriptProvider + ?Sized>(
    variant: &Variant,
    config: &NormalizeConfig,
    provider: &P,
) -> Result<Boundary, NormError> {
    match variant.coord_type {
        CoordinateType::Genomic | CoordinateType::Mitochondrial => Ok(Boundary::unbounded()),
        CoordinateType::Tx | CoordinateType::Rna if config.cross_boundaries => {
            Ok(Boundary::unbounded())
        }
        CoordinateType::Tx | CoordinateType::Rna => {
            exon_boundary(variant, config, provider)
        }
        CoordinateType::Cds => Err(NormError::unsupported(
            variant,
            "CDS coordinates must be converted to transcript coordinates before resolving boundaries",
        )),
        CoordinateType::Protein => Err(NormError::unsupported(
            variant,
            "Unsupported normalization of protein level variants",
        )),
    }
}

/// Index of the first exon whose `[start, end)` contains `pos`
///
/// `starts` and `ends` are the independently sorted exon starts and ends.
fn find_exon(starts: &[u64], ends: &[u64], pos: i64) -> Option<usize> {
    let pos = u64::try_from(pos).ok()?;
    starts
        .iter()
        .zip(ends)
        .position(|(&start, &end)| Boundary::new(start, end).contains(pos))
}

/// 0-based positions used to place the variant in an exon
fn anchors(
    variant: &Variant,
    direction: ShuffleDirection,
    starts: &[u64],
    ends: &[u64],
) -> (i64, i64) {
    let start = variant.location.start.base - 1;
    let end = variant.location.end.base - 1;
    if !matches!(variant.edit, NaEdit::Insertion { .. }) {
        return (start, end);
    }
    let (left_flank, right_flank) = (start, start + 1);
    let (preferred, other) = match direction {
        ShuffleDirection::ThreePrime => (left_flank, right_flank),
        ShuffleDirection::FivePrime => (right_flank, left_flank),
    };
    let anchor = if find_exon(starts, ends, preferred).is_some() {
        preferred
    } else {
        other
    };
    (anchor, anchor)
}

fn exon_boundary<P: TranscriptProvider + ?Sized>(
    variant: &Variant,
    config: &NormalizeConfig,
    provider: &P,
) -> Result<Boundary, NormError> {
    let alt_aln_method = config.alt_aln_method.as_str();
    let tx_ac = variant.accession.as_str();
    let alt_ac = select_alignment(provider, tx_ac, alt_aln_method)?;
    let tx_info = fetch_tx_info(provider, tx_ac, &alt_ac, alt_aln_method)?;

    let exons: Vec<ExonRecord> = provider.get_tx_exons(tx_ac, &alt_ac, alt_aln_method)?;
    if exons.is_empty() {
        return Err(NormError::data_unavailable(
            tx_ac,
            "no exon structure available",
        ));
    }
    let mut starts: Vec<u64> = exons.iter().map(|e| e.tx_start_i).collect();
    let mut ends: Vec<u64> = exons.iter().map(|e| e.tx_end_i).collect();
    starts.sort_unstable();
    ends.sort_unstable();

    let (start, end) = anchors(variant, config.shuffle_direction, &starts, &ends);

    let outside = || {
        NormError::unsupported(
            variant,
            "Unsupported normalization of variants outside of the transcript exons",
        )
    };
    let start_exon = find_exon(&starts, &ends, start).ok_or_else(outside)?;
    let end_exon = find_exon(&starts, &ends, end).ok_or_else(outside)?;
    if start_exon != end_exon {
        return Err(NormError::unsupported(
            variant,
            "Unsupported normalization of variants spanning the exon-intron boundary",
        ));
    }

    let mut left = starts[start_exon];
    let mut right = ends[start_exon];

    if let Some((cds_start, cds_end)) = tx_info.cds() {
        let (cds_start, cds_end) = (cds_start as i64, cds_end as i64);

        if end < cds_start {
            right = right.min(cds_start as u64);
        } else if start >= cds_start {
            left = left.max(cds_start as u64);
        } else {
            return Err(NormError::unsupported(
                variant,
                "Unsupported normalization of variants spanning the UTR-exon boundary",
            ));
        }

        if start >= cds_end {
            left = left.max(cds_end as u64);
        } else if end < cds_end {
            right = right.min(cds_end as u64);
        } else {
            return Err(NormError::unsupported(
                variant,
                "Unsupported normalization of variants spanning the exon-UTR boundary",
            ));
        }
    }

    log::debug!(
        "{}: exon {} boundary [{}, {})",
        variant,
        start_exon,
        left,
        right
    );
    Ok(Boundary::new(left, right))
}
