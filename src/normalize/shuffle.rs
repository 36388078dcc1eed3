//! 3'/5' shuffle engine
//!
//! Drives a [`ShufflePrimitive`] over successive reference windows until the
//! edit stops moving.
//!
//! # Coordinate System
//!
//! | Value | Basis | Notes |
//! |-------|-------|-------|
//! | `base` | 1-based | reference position of `window[0]` |
//! | `start`, `stop` | 0-based | offsets into the current window |
//! | [`ShuffleOutcome`] `start` | 1-based | first affected base |
//! | [`ShuffleOutcome`] `end` | 1-based | exclusive |
//!
//! Windows are `3 * max(len(ref), len(alt))` bases wide. When the edit rolls
//! to the window edge the window is re-anchored and fetched again, so the
//! total fetched sequence grows with the shift distance.

use crate::error::NormError;
use crate::hgvs::edit::NaEdit;
use crate::hgvs::variant::Variant;
use crate::normalize::alleles::{extract, Alleles};
use crate::normalize::config::ShuffleDirection;
use crate::normalize::primitive::ShufflePrimitive;
use crate::normalize::window::WindowFetcher;
use crate::reference::provider::SequenceProvider;

/// Final placement of a shuffled edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleOutcome {
    /// First affected base (1-based)
    pub start: i64,
    /// One past the last affected base (1-based)
    pub end: i64,
    pub alleles: Alleles,
}

/// Window offset handed to the primitive
fn index(variant: &Variant, value: i64) -> Result<usize, NormError> {
    usize::try_from(value).map_err(|_| {
        NormError::invalid_position(
            variant,
            format!("window offset {} precedes the fetched window", value),
        )
    })
}

/// Leftmost 1-based position the boundary allows
fn lowest_position<P: SequenceProvider + ?Sized>(window: &WindowFetcher<'_, P>) -> i64 {
    i64::try_from(window.boundary().left)
        .unwrap_or(i64::MAX)
        .saturating_add(1)
}

/// Shuffle `variant` as far as the window's boundary allows
pub fn shuffle<P: SequenceProvider + ?Sized>(
    variant: &Variant,
    window: &WindowFetcher<'_, P>,
    primitive: &dyn ShufflePrimitive,
    direction: ShuffleDirection,
) -> Result<ShuffleOutcome, NormError> {
    let alleles = extract(variant, window)?;
    shuffle_alleles(variant, alleles, window, primitive, direction)
}

/// Shuffle already extracted alleles of `variant`
pub fn shuffle_alleles<P: SequenceProvider + ?Sized>(
    variant: &Variant,
    alleles: Alleles,
    window: &WindowFetcher<'_, P>,
    primitive: &dyn ShufflePrimitive,
    direction: ShuffleDirection,
) -> Result<ShuffleOutcome, NormError> {
    let win_size = 3 * alleles.max_len() as i64;
    let zero_width = match variant.edit {
        NaEdit::Insertion { .. } => Some(false),
        NaEdit::Duplication { .. } => Some(true),
        _ => None,
    };

    let outcome = match direction {
        ShuffleDirection::ThreePrime => {
            shuffle_right(variant, window, primitive, alleles, win_size, zero_width)?
        }
        ShuffleDirection::FivePrime => {
            shuffle_left(variant, window, primitive, alleles, win_size, zero_width)?
        }
    };
    log::trace!(
        "{} shuffled {} to [{}, {}) ref={} alt={}",
        variant,
        direction,
        outcome.start,
        outcome.end,
        outcome.alleles.reference,
        outcome.alleles.alternate
    );
    Ok(outcome)
}

/// `zero_width` is `Some(is_dup)` for insertions and duplications
fn shuffle_right<P: SequenceProvider + ?Sized>(
    variant: &Variant,
    window: &WindowFetcher<'_, P>,
    primitive: &dyn ShufflePrimitive,
    mut alleles: Alleles,
    win_size: i64,
    zero_width: Option<bool>,
) -> Result<ShuffleOutcome, NormError> {
    let first = variant.location.start.base;
    let last = variant.location.end.base;
    let (mut base, mut start, mut stop) = match zero_width {
        // a gap on the boundary's left edge has no flanking base in the window
        Some(false) => {
            let base = first.max(lowest_position(window));
            (base, first - base + 1, first - base + 1)
        }
        Some(true) => (last, 1, 1),
        None => (first, 0, last - first + 1),
    };

    loop {
        let seq = window.fetch(base - 1, base - 1 + win_size)?;
        if seq.is_empty() {
            break;
        }
        let orig_start = start;
        let shifted = primitive.shift(
            seq.as_bytes(),
            index(variant, start)?,
            index(variant, stop)?,
            alleles,
            seq.len(),
            index(variant, win_size)?,
            ShuffleDirection::ThreePrime,
        );
        start = shifted.start as i64;
        stop = shifted.stop as i64;
        alleles = shifted.alleles;

        // settled inside the window, or pinned at the start: done
        if stop < seq.len() as i64 || start == orig_start {
            break;
        }
        let moved = start - orig_start;
        base += moved;
        stop -= moved;
        start = orig_start;
    }

    Ok(ShuffleOutcome {
        start: base + start,
        end: base + stop,
        alleles,
    })
}

fn shuffle_left<P: SequenceProvider + ?Sized>(
    variant: &Variant,
    window: &WindowFetcher<'_, P>,
    primitive: &dyn ShufflePrimitive,
    mut alleles: Alleles,
    win_size: i64,
    zero_width: Option<bool>,
) -> Result<ShuffleOutcome, NormError> {
    let first = variant.location.start.base;
    let last = variant.location.end.base;
    let lowest = lowest_position(window);

    let mut base = (last - win_size + 1).max(lowest);
    let (mut start, mut stop) = match zero_width {
        Some(false) => (last - base, last - base),
        Some(true) => (last - base + 1, last - base + 1),
        None => (first - base, last - base + 1),
    };

    loop {
        if base < lowest {
            let overshoot = lowest - base;
            start -= overshoot;
            stop -= overshoot;
            base = lowest;
        }
        let seq = window.fetch(base - 1, base - 1 + win_size)?;
        if seq.is_empty() {
            break;
        }
        let orig_stop = stop;
        let shifted = primitive.shift(
            seq.as_bytes(),
            index(variant, start)?,
            index(variant, stop)?,
            alleles,
            0,
            index(variant, win_size)?,
            ShuffleDirection::FivePrime,
        );
        start = shifted.start as i64;
        stop = shifted.stop as i64;
        alleles = shifted.alleles;

        if start > 0 || stop == orig_stop {
            break;
        }
        let moved = orig_stop - stop;
        base -= moved;
        start += moved;
        stop = orig_stop;
    }

    Ok(ShuffleOutcome {
        start: base + start,
        end: base + stop,
        alleles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hgvs::location::Interval;
    use crate::normalize::boundary::Boundary;
    use crate::normalize::primitive::AlleleTrimmer;
    use crate::reference::MockProvider;

    fn run(edit: NaEdit, start: i64, end: i64, direction: ShuffleDirection) -> ShuffleOutcome {
        let provider = MockProvider::with_test_data();
        let variant = Variant::genomic("NC_000001.11", Interval::bases(start, end), edit);
        let window = WindowFetcher::new(&provider, "NC_000001.11", Boundary::unbounded());
        shuffle(&variant, &window, &AlleleTrimmer, direction).unwrap()
    }

    fn del() -> NaEdit {
        NaEdit::Deletion { reference: None }
    }

    #[test]
    fn test_deletion_three_prime() {
        let out = run(del(), 13, 13, ShuffleDirection::ThreePrime);
        assert_eq!((out.start, out.end), (15, 16));
        assert_eq!(out.alleles, Alleles::new("A", ""));
    }

    #[test]
    fn test_deletion_five_prime() {
        let out = run(del(), 13, 13, ShuffleDirection::FivePrime);
        assert_eq!((out.start, out.end), (11, 12));
    }

    #[test]
    fn test_long_run_needs_several_windows() {
        // g.121-160 is a run of 40 A
        let out = run(del(), 121, 121, ShuffleDirection::ThreePrime);
        assert_eq!((out.start, out.end), (160, 161));
        let out = run(del(), 160, 160, ShuffleDirection::FivePrime);
        assert_eq!((out.start, out.end), (121, 122));
    }

    #[test]
    fn test_insertion_marker() {
        let ins = NaEdit::Insertion {
            alternate: "A".into(),
        };
        let out = run(ins.clone(), 12, 13, ShuffleDirection::ThreePrime);
        assert_eq!((out.start, out.end), (16, 16));
        assert_eq!(out.alleles, Alleles::new("", "A"));
        let out = run(ins, 12, 13, ShuffleDirection::FivePrime);
        assert_eq!((out.start, out.end), (11, 11));
    }

    #[test]
    fn test_five_prime_stops_at_sequence_start() {
        let out = run(del(), 3, 3, ShuffleDirection::FivePrime);
        assert_eq!((out.start, out.end), (1, 2));
    }

    #[test]
    fn test_three_prime_stops_at_sequence_end() {
        let out = run(del(), 238, 238, ShuffleDirection::ThreePrime);
        assert_eq!((out.start, out.end), (240, 241));
    }

    #[test]
    fn test_respects_boundary() {
        let provider = MockProvider::with_test_data();
        let variant = Variant::genomic("NC_000001.11", Interval::bases(130, 130), del());
        let window = WindowFetcher::new(&provider, "NC_000001.11", Boundary::new(124, 140));
        let right = shuffle(&variant, &window, &AlleleTrimmer, ShuffleDirection::ThreePrime)
            .unwrap();
        assert_eq!((right.start, right.end), (140, 141));
        let left = shuffle(&variant, &window, &AlleleTrimmer, ShuffleDirection::FivePrime)
            .unwrap();
        assert_eq!((left.start, left.end), (125, 126));
    }

    /// Fails the test if the engine hands over offsets outside the window
    struct InWindow;

    impl ShufflePrimitive for InWindow {
        fn shift(
            &self,
            window: &[u8],
            start: usize,
            stop: usize,
            alleles: Alleles,
            bound: usize,
            window_size: usize,
            direction: ShuffleDirection,
        ) -> crate::normalize::primitive::AlleleShift {
            assert!(
                start <= stop && stop <= window.len(),
                "offsets [{}, {}) outside a window of {}",
                start,
                stop,
                window.len()
            );
            AlleleTrimmer.shift(window, start, stop, alleles, bound, window_size, direction)
        }
    }

    #[test]
    fn test_offsets_stay_inside_window() {
        let provider = MockProvider::with_test_data();
        let window = WindowFetcher::new(&provider, "NC_000001.11", Boundary::unbounded());
        for direction in [ShuffleDirection::ThreePrime, ShuffleDirection::FivePrime] {
            for pos in 1..=240 {
                let end = (pos + 2).min(240);
                let deletion = Variant::genomic("NC_000001.11", Interval::bases(pos, end), del());
                shuffle(&deletion, &window, &InWindow, direction).unwrap();
            }
            for gap in 0..=240 {
                let insertion = Variant::genomic(
                    "NC_000001.11",
                    Interval::bases(gap, gap + 1),
                    NaEdit::Insertion {
                        alternate: "CA".into(),
                    },
                );
                shuffle(&insertion, &window, &InWindow, direction).unwrap();
            }
        }
    }

    #[test]
    fn test_insertion_on_left_edge_three_prime() {
        let ins = NaEdit::Insertion {
            alternate: "AC".into(),
        };
        // the gap before g.1 rolls right over the leading A
        let out = run(ins, 0, 1, ShuffleDirection::ThreePrime);
        assert_eq!((out.start, out.end), (2, 2));
        assert_eq!(out.alleles, Alleles::new("", "CA"));
    }
}
