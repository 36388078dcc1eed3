//! Positions and intervals
//!
//! All variant positions share one representation regardless of coordinate system:
//!
//! | System | `base`                         | `offset`         | `utr3`        |
//! |--------|--------------------------------|------------------|---------------|
//! | g./m.  | 1-based contig position        | always 0         | always false  |
//! | n./r.  | 1-based transcript position    | intron offset    | always false  |
//! | c.     | CDS-relative (negative = 5'UTR)| intron offset    | true for `*N` |
//!
//! An offset of 0 means the position lies on the reference itself.

use serde::{Deserialize, Serialize};
use std::fmt;

fn is_zero(offset: &i64) -> bool {
    *offset == 0
}

/// A single variant position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Base position (1-based; negative for c. 5'UTR positions)
    pub base: i64,
    /// Intron offset from `base` (e.g. +5 in c.100+5)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub offset: i64,
    /// Position is in the 3'UTR (c.*N)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub utr3: bool,
}

impl Position {
    /// Create a position on the reference
    pub fn new(base: i64) -> Self {
        Self {
            base,
            offset: 0,
            utr3: false,
        }
    }

    /// Create an intronic position
    pub fn with_offset(base: i64, offset: i64) -> Self {
        Self {
            base,
            offset,
            utr3: false,
        }
    }

    /// Create a 3'UTR position (c.*N)
    pub fn utr3(base: i64) -> Self {
        Self {
            base,
            offset: 0,
            utr3: true,
        }
    }

    /// Position carries an intron offset from a stated anchor base
    ///
    /// Such positions are never shuffled.
    pub fn is_anchored_intronic(&self) -> bool {
        self.base != 0 && self.offset != 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.utr3 {
            write!(f, "*{}", self.base)?;
        } else {
            write!(f, "{}", self.base)?;
        }
        if self.offset > 0 {
            write!(f, "+{}", self.offset)?;
        } else if self.offset < 0 {
            write!(f, "{}", self.offset)?;
        }
        Ok(())
    }
}

/// An inclusive position range (start..=end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: Position,
    pub end: Position,
}

impl Interval {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Interval covering a single position
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Interval between two plain reference positions
    pub fn bases(start: i64, end: i64) -> Self {
        Self::new(Position::new(start), Position::new(end))
    }

    /// Either endpoint carries an anchored intron offset
    pub fn is_anchored_intronic(&self) -> bool {
        self.start.is_anchored_intronic() || self.end.is_anchored_intronic()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}_{}", self.start, self.end)
        }
    }
}
