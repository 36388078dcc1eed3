//! Transcript metadata records
//!
//! # Coordinate System
//!
//! All coordinates in this module are **0-based, half-open** transcript offsets,
//! matching the interval convention of the sequence store:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `TxInfo.cds_start_i` | index of the first coding base |
//! | `TxInfo.cds_end_i` | index one past the last coding base (stop codon included) |
//! | `ExonRecord.tx_start_i`, `ExonRecord.tx_end_i` | exon span on the transcript |
//!
//! So `c.1` is transcript index `cds_start_i`, i.e. `n.(cds_start_i + 1)`.

use serde::{Deserialize, Serialize};

/// Default alignment method for transcript-to-genome alignments
pub const DEFAULT_ALT_ALN_METHOD: &str = "splign";

/// An available alignment of a transcript onto a genomic sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxMappingOption {
    /// Transcript accession
    pub tx_ac: String,
    /// Accession of the sequence the transcript is aligned to
    pub alt_ac: String,
    /// Alignment method (e.g. "splign", "blat")
    pub alt_aln_method: String,
}

/// Coding region bounds of a transcript
///
/// Non-coding transcripts carry no bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TxInfo {
    #[serde(default)]
    pub cds_start_i: Option<u64>,
    #[serde(default)]
    pub cds_end_i: Option<u64>,
}

impl TxInfo {
    /// Coding transcript with the given CDS bounds
    pub fn coding(cds_start_i: u64, cds_end_i: u64) -> Self {
        Self {
            cds_start_i: Some(cds_start_i),
            cds_end_i: Some(cds_end_i),
        }
    }

    /// Non-coding transcript
    pub fn non_coding() -> Self {
        Self::default()
    }

    /// CDS bounds, if both are known
    pub fn cds(&self) -> Option<(u64, u64)> {
        self.cds_start_i.zip(self.cds_end_i)
    }
}

/// One exon of a transcript alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExonRecord {
    /// Exon ordinal (0-based, in transcript order)
    #[serde(default)]
    pub ord: u32,
    pub tx_start_i: u64,
    pub tx_end_i: u64,
}

impl ExonRecord {
    pub fn new(ord: u32, tx_start_i: u64, tx_end_i: u64) -> Self {
        Self {
            ord,
            tx_start_i,
            tx_end_i,
        }
    }

    /// Exon length in bases
    pub fn len(&self) -> u64 {
        self.tx_end_i.saturating_sub(self.tx_start_i)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether a 0-based transcript index lies in this exon
    pub fn contains(&self, pos: u64) -> bool {
        pos >= self.tx_start_i && pos < self.tx_end_i
    }
}

/// Alignment-specific metadata for one transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptAlignment {
    pub alt_ac: String,
    #[serde(default = "default_alt_aln_method")]
    pub alt_aln_method: String,
    #[serde(default)]
    pub cds_start_i: Option<u64>,
    #[serde(default)]
    pub cds_end_i: Option<u64>,
    #[serde(default)]
    pub exons: Vec<ExonRecord>,
}

fn default_alt_aln_method() -> String {
    DEFAULT_ALT_ALN_METHOD.to_string()
}

impl TranscriptAlignment {
    pub fn tx_info(&self) -> TxInfo {
        TxInfo {
            cds_start_i: self.cds_start_i,
            cds_end_i: self.cds_end_i,
        }
    }
}

/// A transcript and all of its alignments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub accession: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_symbol: Option<String>,
    #[serde(default)]
    pub alignments: Vec<TranscriptAlignment>,
}

impl TranscriptRecord {
    /// Mapping options in the order the alignments were recorded
    pub fn mapping_options(&self) -> Vec<TxMappingOption> {
        self.alignments
            .iter()
            .map(|aln| TxMappingOption {
                tx_ac: self.accession.clone(),
                alt_ac: aln.alt_ac.clone(),
                alt_aln_method: aln.alt_aln_method.clone(),
            })
            .collect()
    }

    /// Alignment onto `alt_ac` with `alt_aln_method`
    pub fn alignment(&self, alt_ac: &str, alt_aln_method: &str) -> Option<&TranscriptAlignment> {
        self.alignments
            .iter()
            .find(|aln| aln.alt_ac == alt_ac && aln.alt_aln_method == alt_aln_method)
    }
}
