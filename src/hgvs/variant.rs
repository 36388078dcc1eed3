//! Sequence variant types
//!
//! A [`Variant`] is an already-parsed variant description: accession,
//! coordinate system, position range and edit. Normalization never mutates a
//! variant; it builds a new one with [`Variant::with_location_and_edit`].

use super::edit::NaEdit;
use super::location::Interval;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coordinate system of a variant (the `g.`/`c.`/... prefix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateType {
    /// Genomic (g.)
    #[serde(rename = "g")]
    Genomic,
    /// Mitochondrial (m.)
    #[serde(rename = "m")]
    Mitochondrial,
    /// Coding DNA, CDS-relative (c.)
    #[serde(rename = "c")]
    Cds,
    /// Non-coding / transcript nucleotide (n.)
    #[serde(rename = "n")]
    Tx,
    /// RNA (r.)
    #[serde(rename = "r")]
    Rna,
    /// Protein (p.)
    #[serde(rename = "p")]
    Protein,
}

impl CoordinateType {
    /// The single-letter HGVS prefix
    pub fn prefix(&self) -> char {
        match self {
            CoordinateType::Genomic => 'g',
            CoordinateType::Mitochondrial => 'm',
            CoordinateType::Cds => 'c',
            CoordinateType::Tx => 'n',
            CoordinateType::Rna => 'r',
            CoordinateType::Protein => 'p',
        }
    }

    /// Positions are relative to a transcript (n./r.)
    pub fn is_transcript(&self) -> bool {
        matches!(self, CoordinateType::Tx | CoordinateType::Rna)
    }
}

impl fmt::Display for CoordinateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for CoordinateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end_matches('.') {
            "g" => Ok(CoordinateType::Genomic),
            "m" => Ok(CoordinateType::Mitochondrial),
            "c" => Ok(CoordinateType::Cds),
            "n" => Ok(CoordinateType::Tx),
            "r" => Ok(CoordinateType::Rna),
            "p" => Ok(CoordinateType::Protein),
            _ => Err(format!("Unknown coordinate type: {}", s)),
        }
    }
}

/// A sequence variant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    /// Reference sequence accession (e.g. NM_001166478.1)
    pub accession: String,
    /// Coordinate system
    #[serde(rename = "type")]
    pub coord_type: CoordinateType,
    /// Affected position range
    pub location: Interval,
    /// The edit
    pub edit: NaEdit,
}

impl Variant {
    pub fn new(
        accession: impl Into<String>,
        coord_type: CoordinateType,
        location: Interval,
        edit: NaEdit,
    ) -> Self {
        Self {
            accession: accession.into(),
            coord_type,
            location,
            edit,
        }
    }

    /// Genomic variant
    pub fn genomic(accession: impl Into<String>, location: Interval, edit: NaEdit) -> Self {
        Self::new(accession, CoordinateType::Genomic, location, edit)
    }

    /// Coding (c.) variant
    pub fn cds(accession: impl Into<String>, location: Interval, edit: NaEdit) -> Self {
        Self::new(accession, CoordinateType::Cds, location, edit)
    }

    /// Transcript nucleotide (n.) variant
    pub fn tx(accession: impl Into<String>, location: Interval, edit: NaEdit) -> Self {
        Self::new(accession, CoordinateType::Tx, location, edit)
    }

    /// A copy of this variant at a new location with a new edit
    pub fn with_location_and_edit(&self, location: Interval, edit: NaEdit) -> Self {
        Self {
            accession: self.accession.clone(),
            coord_type: self.coord_type,
            location,
            edit,
        }
    }

    /// A copy of this variant in another coordinate system
    pub fn with_coordinates(&self, coord_type: CoordinateType, location: Interval) -> Self {
        Self {
            accession: self.accession.clone(),
            coord_type,
            location,
            edit: self.edit.clone(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}.{}{}",
            self.accession, self.coord_type, self.location, self.edit
        )
    }
}
