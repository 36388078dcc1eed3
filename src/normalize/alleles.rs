//! Initial reference/alternate alleles of an edit
//!
//! The reference allele is always read from the reference sequence; a
//! reference stated in the edit is only checked against it.

use crate::error::NormError;
use crate::hgvs::edit::{is_nucleotide_sequence, NaEdit};
use crate::hgvs::variant::Variant;
use crate::normalize::window::WindowFetcher;
use crate::reference::provider::SequenceProvider;

/// A reference/alternate allele pair
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alleles {
    pub reference: String,
    pub alternate: String,
}

impl Alleles {
    pub fn new(reference: impl Into<String>, alternate: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            alternate: alternate.into(),
        }
    }

    /// Length of the longer allele
    pub fn max_len(&self) -> usize {
        self.reference.len().max(self.alternate.len())
    }
}

fn check_alphabet(variant: &Variant, seq: &str) -> Result<(), NormError> {
    if is_nucleotide_sequence(seq) {
        Ok(())
    } else {
        Err(NormError::invalid_sequence(variant, seq))
    }
}

/// Check that the reference actually holds the bases the variant names
///
/// Fetches are truncated at the end of the sequence, so a short read means
/// the range runs past it. An insertion needs one readable flank.
fn check_span<P: SequenceProvider + ?Sized>(
    variant: &Variant,
    window: &WindowFetcher<'_, P>,
) -> Result<(), NormError> {
    let start = variant.location.start.base;
    let end = variant.location.end.base;
    let past_end = || {
        NormError::invalid_position(
            variant,
            format!("{} ends before position {}", window.accession(), end),
        )
    };
    match variant.edit {
        NaEdit::Insertion { .. } => {
            let left = window.fetch(start - 1, start)?;
            if left.is_empty() && window.fetch(start, end)?.is_empty() {
                return Err(past_end());
            }
        }
        NaEdit::Uncertain => {}
        _ => {
            let span = end - start + 1;
            if (window.fetch(start - 1, end)?.len() as i64) < span {
                return Err(past_end());
            }
        }
    }
    Ok(())
}

/// Derive the alleles of `variant` from the reference
pub fn extract<P: SequenceProvider + ?Sized>(
    variant: &Variant,
    window: &WindowFetcher<'_, P>,
) -> Result<Alleles, NormError> {
    let start = variant.location.start.base;
    let end = variant.location.end.base;
    let edit = &variant.edit;

    check_span(variant, window)?;

    if let Some(alt) = edit.stated_alternate() {
        check_alphabet(variant, alt)?;
    }

    let reference = match edit {
        NaEdit::Insertion { .. } => String::new(),
        NaEdit::Duplication { sequence } => {
            if let Some(seq) = sequence.as_deref().filter(|s| !s.is_empty()) {
                check_alphabet(variant, seq)?;
                let fetched = window.fetch(start - 1, end)?;
                if fetched != seq {
                    return Err(NormError::reference_mismatch(variant, seq, &fetched));
                }
            }
            String::new()
        }
        NaEdit::Uncertain => {
            return Err(NormError::unsupported(
                variant,
                "uncertain edits have no alleles",
            ))
        }
        _ => {
            let fetched = window.fetch(start - 1, end)?;
            if let Some(stated) = edit.stated_reference() {
                check_alphabet(variant, stated)?;
                if stated != fetched {
                    return Err(NormError::reference_mismatch(variant, stated, &fetched));
                }
            }
            fetched
        }
    };

    let alternate = match edit {
        NaEdit::Substitution { alternate, .. }
        | NaEdit::Delins { alternate, .. }
        | NaEdit::Insertion { alternate } => alternate.clone(),
        NaEdit::Deletion { .. } => String::new(),
        NaEdit::Duplication { sequence } => match sequence.as_deref().filter(|s| !s.is_empty()) {
            Some(seq) => seq.to_string(),
            None => window.fetch(start - 1, end)?,
        },
        NaEdit::Inversion => reference.chars().rev().collect(),
        NaEdit::Identity { .. } => reference.clone(),
        NaEdit::Uncertain => String::new(),
    };

    Ok(Alleles {
        reference,
        alternate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hgvs::location::Interval;
    use crate::normalize::boundary::Boundary;
    use crate::reference::MockProvider;

    // NC_000001.11 positions 11-15 are AAAAA, 16 is G, 201-203 are GCT

    fn alleles_of(edit: NaEdit, start: i64, end: i64) -> Result<Alleles, NormError> {
        let provider = MockProvider::with_test_data();
        let variant = Variant::genomic("NC_000001.11", Interval::bases(start, end), edit);
        let window = WindowFetcher::new(&provider, "NC_000001.11", Boundary::unbounded());
        extract(&variant, &window)
    }

    #[test]
    fn test_substitution() {
        let edit = NaEdit::Substitution {
            reference: "G".into(),
            alternate: "T".into(),
        };
        assert_eq!(alleles_of(edit, 16, 16).unwrap(), Alleles::new("G", "T"));
    }

    #[test]
    fn test_substitution_reference_mismatch() {
        let edit = NaEdit::Substitution {
            reference: "C".into(),
            alternate: "T".into(),
        };
        let err = alleles_of(edit, 16, 16).unwrap_err();
        assert!(matches!(err, NormError::Validation { .. }));
    }

    #[test]
    fn test_reference_check_is_case_sensitive() {
        let edit = NaEdit::Deletion {
            reference: Some("g".into()),
        };
        assert!(alleles_of(edit, 16, 16).is_err());
    }

    #[test]
    fn test_deletion() {
        let edit = NaEdit::Deletion { reference: None };
        assert_eq!(alleles_of(edit, 14, 16).unwrap(), Alleles::new("AAG", ""));
        let edit = NaEdit::Deletion {
            reference: Some(String::new()),
        };
        assert_eq!(alleles_of(edit, 14, 14).unwrap(), Alleles::new("A", ""));
    }

    #[test]
    fn test_insertion() {
        let edit = NaEdit::Insertion {
            alternate: "TT".into(),
        };
        assert_eq!(alleles_of(edit, 12, 13).unwrap(), Alleles::new("", "TT"));
    }

    #[test]
    fn test_insertion_invalid_alphabet() {
        let edit = NaEdit::Insertion {
            alternate: "TZ".into(),
        };
        let err = alleles_of(edit, 12, 13).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidSequence);
    }

    #[test]
    fn test_duplication_without_sequence() {
        let edit = NaEdit::Duplication { sequence: None };
        assert_eq!(alleles_of(edit, 15, 16).unwrap(), Alleles::new("", "AG"));
    }

    #[test]
    fn test_duplication_with_sequence() {
        let edit = NaEdit::Duplication {
            sequence: Some("AG".into()),
        };
        assert_eq!(alleles_of(edit, 15, 16).unwrap(), Alleles::new("", "AG"));
        let edit = NaEdit::Duplication {
            sequence: Some("AC".into()),
        };
        assert!(matches!(
            alleles_of(edit, 15, 16),
            Err(NormError::Validation { .. })
        ));
    }

    #[test]
    fn test_delins() {
        let edit = NaEdit::Delins {
            reference: None,
            alternate: "GAA".into(),
        };
        assert_eq!(alleles_of(edit, 201, 203).unwrap(), Alleles::new("GCT", "GAA"));
    }

    #[test]
    fn test_inversion_is_reversed_not_complemented() {
        assert_eq!(
            alleles_of(NaEdit::Inversion, 201, 203).unwrap(),
            Alleles::new("GCT", "TCG")
        );
    }

    #[test]
    fn test_identity() {
        let edit = NaEdit::Identity { reference: None };
        assert_eq!(alleles_of(edit, 16, 16).unwrap(), Alleles::new("G", "G"));
    }

    #[test]
    fn test_uncertain_rejected() {
        assert!(alleles_of(NaEdit::Uncertain, 16, 16).unwrap_err().is_unsupported());
    }

    #[test]
    fn test_span_cut_short_is_rejected() {
        let provider = MockProvider::with_test_data();
        let variant = Variant::genomic(
            "NC_000001.11",
            Interval::bases(14, 17),
            NaEdit::Deletion { reference: None },
        );
        let window = WindowFetcher::new(&provider, "NC_000001.11", Boundary::new(13, 15));
        let err = extract(&variant, &window).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidPosition);
    }

    #[test]
    fn test_ranges_past_sequence_end() {
        // NC_000001.11 is 240 bp
        let del = || NaEdit::Deletion { reference: None };
        let ins = || NaEdit::Insertion {
            alternate: "T".into(),
        };
        for (edit, start, end) in [
            (del(), 239, 245),
            (del(), 241, 241),
            (NaEdit::Duplication { sequence: None }, 240, 241),
            (ins(), 241, 242),
        ] {
            let err = alleles_of(edit, start, end).unwrap_err();
            assert_eq!(err.code(), crate::error::ErrorCode::InvalidPosition);
            assert!(err.to_string().contains("NC_000001.11 ends before"), "{}", err);
        }
        assert_eq!(alleles_of(del(), 239, 240).unwrap(), Alleles::new("TT", ""));
        assert_eq!(alleles_of(ins(), 240, 241).unwrap(), Alleles::new("", "T"));
        assert_eq!(alleles_of(ins(), 0, 1).unwrap(), Alleles::new("", "T"));
    }
}
