//! Mock reference provider for testing
//!
//! Also serves as the in-memory provider behind the command-line tool, which
//! loads a [`ReferenceData`] JSON document.

use crate::error::NormError;
use crate::reference::provider::{SequenceProvider, TranscriptProvider};
use crate::reference::transcript::{
    ExonRecord, TranscriptAlignment, TranscriptRecord, TxInfo, TxMappingOption,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Serialized reference data: sequences by accession plus transcript records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub sequences: BTreeMap<String, String>,
    #[serde(default)]
    pub transcripts: Vec<TranscriptRecord>,
}

/// Mock reference provider holding everything in memory
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    sequences: HashMap<String, String>,
    transcripts: HashMap<String, TranscriptRecord>,
}

impl MockProvider {
    /// Create an empty mock provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Load reference data from a JSON file
    pub fn from_json(path: &Path) -> Result<Self, NormError> {
        let content = std::fs::read_to_string(path)?;
        let data: ReferenceData = serde_json::from_str(&content)?;
        log::debug!(
            "Loaded {} sequences and {} transcripts from {}",
            data.sequences.len(),
            data.transcripts.len(),
            path.display()
        );
        Ok(Self::from_reference_data(data))
    }

    /// Build a provider from already-deserialized reference data
    pub fn from_reference_data(data: ReferenceData) -> Self {
        let mut provider = Self::new();
        for (accession, sequence) in data.sequences {
            provider.add_sequence(accession, sequence);
        }
        for record in data.transcripts {
            provider.add_transcript(record);
        }
        provider
    }

    /// Add (or replace) a sequence
    pub fn add_sequence(&mut self, accession: impl Into<String>, sequence: impl Into<String>) {
        self.sequences.insert(accession.into(), sequence.into());
    }

    /// Add (or replace) a transcript record
    pub fn add_transcript(&mut self, record: TranscriptRecord) {
        self.transcripts.insert(record.accession.clone(), record);
    }

    /// Check whether a sequence is known
    pub fn has_sequence(&self, accession: &str) -> bool {
        self.sequences.contains_key(accession)
    }

    /// Length of a known sequence
    pub fn sequence_len(&self, accession: &str) -> Option<usize> {
        self.sequences.get(accession).map(String::len)
    }

    /// Create a provider with a small synthetic data set
    ///
    /// | Accession | Length | Notes |
    /// |-----------|--------|-------|
    /// | `NC_000001.11` | 240 | genomic contig with homopolymer, dinucleotide and 40 bp poly-A runs |
    /// | `NM_001166478.1` | 200 | exons [0,60) [60,130) [130,200), CDS [20,180); `blat` alignment is a single exon |
    /// | `NR_024540.1` | 100 | non-coding, exons [0,40) [40,100) |
    pub fn with_test_data() -> Self {
        let mut provider = Self::new();

        provider.add_sequence(
            "NC_000001.11",
            concat!(
                "AAACGTCGTCAAAAAGTCGCTGCTGATCGGCACACATGGTCTGATCCTGG",
                "ACGTTCTGACTCGGTCAGTCTTGATCGCTGGCTCGTAGCGTCAGTGCATG",
                "CCGTGACTGCTCAGCGTCAGAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
                "AAAAAAAAAACTGCGTCAGTGCATGCGTCAGTCGATCGCACTGTCGAGCA",
                "GCTCAGTCGACGTAGCTAGCGATCGTAGCACGATCGCTTT",
            ),
        );

        provider.add_sequence(
            "NM_001166478.1",
            concat!(
                "GCTAGCTGACTCGCTAGCAAAAGCGTCAGTCGATGCTAGCGATCGCTAGC",
                "TAGCCGATTTTTTCGATGCATGCAGTCCGGGATCGTACGTCGATCGTAGC",
                "TAGCTAGCATCGATCGACTGCATGCTAGCTAGCTAGCTGATCGATCGATG",
                "CTAGCATGCATCGACTAGCATGCATGATCCCCGATCGTAGCTAGCATGCA",
            ),
        );
        provider.add_transcript(TranscriptRecord {
            accession: "NM_001166478.1".to_string(),
            gene_symbol: Some("TSHZ3".to_string()),
            alignments: vec![
                TranscriptAlignment {
                    alt_ac: "NC_000010.11".to_string(),
                    alt_aln_method: "splign".to_string(),
                    cds_start_i: Some(20),
                    cds_end_i: Some(180),
                    exons: vec![
                        ExonRecord::new(2, 130, 200),
                        ExonRecord::new(0, 0, 60),
                        ExonRecord::new(1, 60, 130),
                    ],
                },
                TranscriptAlignment {
                    alt_ac: "NC_000010.10".to_string(),
                    alt_aln_method: "blat".to_string(),
                    cds_start_i: Some(20),
                    cds_end_i: Some(180),
                    exons: vec![ExonRecord::new(0, 0, 200)],
                },
            ],
        });

        provider.add_sequence(
            "NR_024540.1",
            concat!(
                "CTAGCTGACTGCATCGATCGATCGTACGATCGATCTAGGGGGCATCGATC",
                "TAGCTAGCATCGATGCATCGATCGATGCTAGCATCGATCGTAGCATCGAC",
            ),
        );
        provider.add_transcript(TranscriptRecord {
            accession: "NR_024540.1".to_string(),
            gene_symbol: Some("WASH7P".to_string()),
            alignments: vec![TranscriptAlignment {
                alt_ac: "NC_000002.12".to_string(),
                alt_aln_method: "splign".to_string(),
                cds_start_i: None,
                cds_end_i: None,
                exons: vec![ExonRecord::new(0, 0, 40), ExonRecord::new(1, 40, 100)],
            }],
        });

        provider
    }
}

impl SequenceProvider for MockProvider {
    fn fetch_seq(&self, accession: &str, start: u64, end: u64) -> Result<String, NormError> {
        let seq = self
            .sequences
            .get(accession)
            .ok_or_else(|| NormError::data_unavailable(accession, "sequence not found"))?;
        let len = seq.len();
        let start = usize::try_from(start).unwrap_or(usize::MAX).min(len);
        let end = usize::try_from(end).unwrap_or(usize::MAX).min(len);
        if start >= end {
            return Ok(String::new());
        }
        seq.get(start..end)
            .map(str::to_string)
            .ok_or_else(|| NormError::data_unavailable(accession, "sequence is not ASCII"))
    }
}

impl TranscriptProvider for MockProvider {
    fn get_tx_mapping_options(&self, tx_ac: &str) -> Result<Vec<TxMappingOption>, NormError> {
        Ok(self
            .transcripts
            .get(tx_ac)
            .map(TranscriptRecord::mapping_options)
            .unwrap_or_default())
    }

    fn get_tx_info(
        &self,
        tx_ac: &str,
        alt_ac: &str,
        alt_aln_method: &str,
    ) -> Result<Option<TxInfo>, NormError> {
        Ok(self
            .transcripts
            .get(tx_ac)
            .and_then(|rec| rec.alignment(alt_ac, alt_aln_method))
            .map(TranscriptAlignment::tx_info))
    }

    fn get_tx_exons(
        &self,
        tx_ac: &str,
        alt_ac: &str,
        alt_aln_method: &str,
    ) -> Result<Vec<ExonRecord>, NormError> {
        Ok(self
            .transcripts
            .get(tx_ac)
            .and_then(|rec| rec.alignment(alt_ac, alt_aln_method))
            .map(|aln| aln.exons.clone())
            .unwrap_or_default())
    }
}
