//! Allele shifting primitive
//!
//! The shuffle engine delegates the per-window work to a [`ShufflePrimitive`]:
//! given one fetched reference window and the current allele pair, trim the
//! alleles and roll the edit as far as the window allows.
//!
//! # Index convention
//!
//! `start` and `stop` are 0-based half-open offsets into `window`. For an
//! insertion or duplication `start == stop` marks the point between
//! `window[start - 1]` and `window[start]`.
//!
//! | Direction | Rolls towards | `bound` |
//! |-----------|---------------|---------|
//! | 3'        | `window.len()` | right limit for `stop` |
//! | 5'        | `0`            | left limit for `start` |

use crate::normalize::alleles::Alleles;
use crate::normalize::config::ShuffleDirection;

/// Offsets and alleles after one primitive call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlleleShift {
    pub start: usize,
    pub stop: usize,
    pub alleles: Alleles,
}

/// Trims an allele pair against a reference window and slides it
pub trait ShufflePrimitive: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    fn shift(
        &self,
        window: &[u8],
        start: usize,
        stop: usize,
        alleles: Alleles,
        bound: usize,
        window_size: usize,
        direction: ShuffleDirection,
    ) -> AlleleShift;
}

/// Default primitive: common prefix/suffix trimming, then rolling the
/// non-empty allele across repeated reference context
#[derive(Debug, Clone, Copy, Default)]
pub struct AlleleTrimmer;

fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Exactly one allele is empty, so the edit can still roll
fn can_roll(reference: &[u8], alternate: &[u8]) -> bool {
    reference.is_empty() != alternate.is_empty()
}

fn upper(chunk: &[u8]) -> Vec<u8> {
    chunk.to_ascii_uppercase()
}

fn join(head: &[u8], tail: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(head.len() + tail.len());
    out.extend_from_slice(head);
    out.extend_from_slice(tail);
    out
}

impl AlleleTrimmer {
    fn roll_right(
        window: &[u8],
        mut start: usize,
        mut stop: usize,
        mut reference: Vec<u8>,
        mut alternate: Vec<u8>,
        bound: usize,
        window_size: usize,
    ) -> (usize, usize, Vec<u8>, Vec<u8>) {
        let trim = common_prefix(&reference, &alternate);
        reference.drain(..trim);
        alternate.drain(..trim);
        start += trim;

        let trim = common_suffix(&reference, &alternate);
        reference.truncate(reference.len() - trim);
        alternate.truncate(alternate.len() - trim);
        stop = stop.saturating_sub(trim);

        let bound = bound.min(window.len());
        while can_roll(&reference, &alternate) && stop < bound {
            let end = (stop + window_size).min(bound);
            let chunk = upper(&window[stop..end]);
            let step = chunk.len();
            let next_ref = join(&reference, &chunk);
            let next_alt = join(&alternate, &chunk);

            let moved = common_prefix(&next_ref, &next_alt);
            if moved == 0 {
                break;
            }
            start += moved;
            stop += moved;

            if moved == step {
                reference = next_ref[moved..].to_vec();
                alternate = next_alt[moved..].to_vec();
            } else {
                let unused = step - moved;
                reference = next_ref[moved..next_ref.len() - unused].to_vec();
                alternate = next_alt[moved..next_alt.len() - unused].to_vec();
                break;
            }
        }
        (start, stop, reference, alternate)
    }

    fn roll_left(
        window: &[u8],
        mut start: usize,
        mut stop: usize,
        mut reference: Vec<u8>,
        mut alternate: Vec<u8>,
        bound: usize,
        window_size: usize,
    ) -> (usize, usize, Vec<u8>, Vec<u8>) {
        let trim = common_suffix(&reference, &alternate);
        reference.truncate(reference.len() - trim);
        alternate.truncate(alternate.len() - trim);
        stop = stop.saturating_sub(trim);

        let trim = common_prefix(&reference, &alternate);
        reference.drain(..trim);
        alternate.drain(..trim);
        start += trim;

        // offsets past the window have no adjacent bases to compare
        while can_roll(&reference, &alternate) && start > bound && start <= window.len() {
            let lo = start.saturating_sub(window_size).max(bound);
            let chunk = upper(&window[lo..start]);
            let step = chunk.len();
            let next_ref = join(&chunk, &reference);
            let next_alt = join(&chunk, &alternate);

            let moved = common_suffix(&next_ref, &next_alt);
            if moved == 0 {
                break;
            }
            start -= moved;
            stop = stop.saturating_sub(moved);

            if moved == step {
                reference = next_ref[..next_ref.len() - moved].to_vec();
                alternate = next_alt[..next_alt.len() - moved].to_vec();
            } else {
                let unused = step - moved;
                reference = next_ref[unused..next_ref.len() - moved].to_vec();
                alternate = next_alt[unused..next_alt.len() - moved].to_vec();
                break;
            }
        }
        (start, stop, reference, alternate)
    }
}

impl ShufflePrimitive for AlleleTrimmer {
    fn shift(
        &self,
        window: &[u8],
        start: usize,
        stop: usize,
        alleles: Alleles,
        bound: usize,
        window_size: usize,
        direction: ShuffleDirection,
    ) -> AlleleShift {
        let reference = alleles.reference.into_bytes();
        let alternate = alleles.alternate.into_bytes();
        let (start, stop, reference, alternate) = match direction {
            ShuffleDirection::ThreePrime => Self::roll_right(
                window,
                start,
                stop,
                reference,
                alternate,
                bound,
                window_size,
            ),
            ShuffleDirection::FivePrime => Self::roll_left(
                window,
                start,
                stop,
                reference,
                alternate,
                bound,
                window_size,
            ),
        };
        AlleleShift {
            start,
            stop,
            alleles: Alleles {
                reference: String::from_utf8_lossy(&reference).into_owned(),
                alternate: String::from_utf8_lossy(&alternate).into_owned(),
            },
        }
    }
}
