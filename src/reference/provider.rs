//! Reference provider traits
//!
//! Normalization needs two kinds of reference data: raw sequence, and the
//! exon/CDS layout of transcripts. They are separate traits so a sequence
//! store and a transcript database can be backed by different services;
//! [`DataProvider`] is the combination the normalizer consumes.

use std::sync::Arc;

use crate::error::NormError;
use crate::reference::transcript::{ExonRecord, TxInfo, TxMappingOption};

/// Trait for fetching reference sequence
///
/// Implementations might include:
/// - MockProvider for testing
/// - a SeqRepo-style local sequence archive
/// - a remote sequence service
pub trait SequenceProvider {
    /// Get a sequence region
    ///
    /// # Arguments
    ///
    /// * `accession` - Sequence accession
    /// * `start` - 0-based start position
    /// * `end` - 0-based end position (exclusive)
    ///
    /// Ranges running past the end of the sequence are truncated, so the
    /// result may be shorter than requested (or empty). An unknown accession
    /// is [`NormError::DataUnavailable`].
    fn fetch_seq(&self, accession: &str, start: u64, end: u64) -> Result<String, NormError>;
}

/// Trait for transcript alignment metadata
pub trait TranscriptProvider {
    /// Alignments available for a transcript
    fn get_tx_mapping_options(&self, tx_ac: &str) -> Result<Vec<TxMappingOption>, NormError>;

    /// CDS bounds for a transcript alignment, `None` if the alignment is unknown
    fn get_tx_info(
        &self,
        tx_ac: &str,
        alt_ac: &str,
        alt_aln_method: &str,
    ) -> Result<Option<TxInfo>, NormError>;

    /// Exons of a transcript alignment, empty if the alignment is unknown
    fn get_tx_exons(
        &self,
        tx_ac: &str,
        alt_ac: &str,
        alt_aln_method: &str,
    ) -> Result<Vec<ExonRecord>, NormError>;
}

/// Everything the normalizer needs from a data store
pub trait DataProvider: SequenceProvider + TranscriptProvider {}

impl<T: SequenceProvider + TranscriptProvider + ?Sized> DataProvider for T {}

macro_rules! forward_provider {
    ($wrapper:ty) => {
        impl<P: SequenceProvider + ?Sized> SequenceProvider for $wrapper {
            fn fetch_seq(&self, accession: &str, start: u64, end: u64) -> Result<String, NormError> {
                (**self).fetch_seq(accession, start, end)
            }
        }

        impl<P: TranscriptProvider + ?Sized> TranscriptProvider for $wrapper {
            fn get_tx_mapping_options(
                &self,
                tx_ac: &str,
            ) -> Result<Vec<TxMappingOption>, NormError> {
                (**self).get_tx_mapping_options(tx_ac)
            }

            fn get_tx_info(
                &self,
                tx_ac: &str,
                alt_ac: &str,
                alt_aln_method: &str,
            ) -> Result<Option<TxInfo>, NormError> {
                (**self).get_tx_info(tx_ac, alt_ac, alt_aln_method)
            }

            fn get_tx_exons(
                &self,
                tx_ac: &str,
                alt_ac: &str,
                alt_aln_method: &str,
            ) -> Result<Vec<ExonRecord>, NormError> {
                (**self).get_tx_exons(tx_ac, alt_ac, alt_aln_method)
            }
        }
    };
}

forward_provider!(&P);
forward_provider!(Box<P>);
forward_provider!(Arc<P>);

/// Pick the genomic accession a transcript is aligned to with `alt_aln_method`
///
/// The first matching mapping option wins.
pub fn select_alignment<P: TranscriptProvider + ?Sized>(
    provider: &P,
    tx_ac: &str,
    alt_aln_method: &str,
) -> Result<String, NormError> {
    let options = provider.get_tx_mapping_options(tx_ac)?;
    if options.is_empty() {
        return Err(NormError::data_unavailable(
            tx_ac,
            "no mapping info available",
        ));
    }
    options
        .into_iter()
        .find(|opt| opt.alt_aln_method == alt_aln_method)
        .map(|opt| opt.alt_ac)
        .ok_or_else(|| {
            NormError::data_unavailable(
                tx_ac,
                format!("no alignment available using method '{}'", alt_aln_method),
            )
        })
}

/// CDS bounds of a transcript under the selected alignment
pub fn fetch_tx_info<P: TranscriptProvider + ?Sized>(
    provider: &P,
    tx_ac: &str,
    alt_ac: &str,
    alt_aln_method: &str,
) -> Result<TxInfo, NormError> {
    provider
        .get_tx_info(tx_ac, alt_ac, alt_aln_method)?
        .ok_or_else(|| NormError::data_unavailable(tx_ac, "no transcript info available"))
}
