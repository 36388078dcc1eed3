//! Edit classification after shuffling
//!
//! | Alleles | Result |
//! |---------|--------|
//! | `len(alt) == len(ref)`, one base | substitution |
//! | `len(alt) == len(ref)`, longer | delins |
//! | `alt` empty | deletion |
//! | `ref` empty, `alt` repeats the flank | duplication |
//! | `ref` empty otherwise | insertion |
//! | anything else | delins |
//!
//! Only the flank on the side the edit was shuffled towards is compared: the
//! left flank for 3' shuffling, the right flank for 5'.

use crate::error::NormError;
use crate::hgvs::edit::NaEdit;
use crate::normalize::config::ShuffleDirection;
use crate::normalize::shuffle::ShuffleOutcome;
use crate::normalize::window::WindowFetcher;
use crate::reference::provider::SequenceProvider;

/// Canonical edit and the 1-based inclusive range it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub edit: NaEdit,
    pub start: i64,
    pub end: i64,
}

/// Map a shuffle outcome onto the minimal edit kind
///
/// With `fill` disabled, deletion/delins/duplication edits omit the literal
/// reference (or duplicated) sequence.
pub fn classify<P: SequenceProvider + ?Sized>(
    window: &WindowFetcher<'_, P>,
    outcome: &ShuffleOutcome,
    direction: ShuffleDirection,
    fill: bool,
) -> Result<Classification, NormError> {
    let (start, end) = (outcome.start, outcome.end);
    let reference = &outcome.alleles.reference;
    let alternate = &outcome.alleles.alternate;
    let filled = |seq: &String| fill.then(|| seq.clone());
    let delins = || NaEdit::Delins {
        reference: filled(reference),
        alternate: alternate.clone(),
    };

    let (edit, start, end) = if alternate.len() == reference.len() {
        if start == end - 1 {
            let edit = NaEdit::Substitution {
                reference: reference.clone(),
                alternate: alternate.clone(),
            };
            (edit, start, end - 1)
        } else {
            (delins(), start, end - 1)
        }
    } else if alternate.len() < reference.len() {
        if alternate.is_empty() {
            let edit = NaEdit::Deletion {
                reference: filled(reference),
            };
            (edit, start, end - 1)
        } else {
            (delins(), start, end - 1)
        }
    } else if reference.is_empty() {
        let len = alternate.len() as i64;
        let left = match direction {
            ShuffleDirection::ThreePrime => window.fetch(start - len - 1, end - 1)?,
            ShuffleDirection::FivePrime => String::new(),
        };
        let right = match direction {
            ShuffleDirection::FivePrime => window.fetch(start - 1, start + len - 1)?,
            ShuffleDirection::ThreePrime => String::new(),
        };
        let dup = || NaEdit::Duplication {
            sequence: filled(alternate),
        };

        if *alternate == left {
            (dup(), start - len, end - 1)
        } else if *alternate == right {
            (dup(), start, start + len - 1)
        } else {
            let edit = NaEdit::Insertion {
                alternate: alternate.clone(),
            };
            (edit, start - 1, end)
        }
    } else {
        (delins(), start, end - 1)
    };

    Ok(Classification { edit, start, end })
}
