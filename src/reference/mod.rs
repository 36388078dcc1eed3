//! Reference data abstraction
//!
//! Provides traits and implementations for accessing reference sequence data
//! and transcript alignment metadata.

pub mod mock;
pub mod provider;
pub mod transcript;

pub use mock::{MockProvider, ReferenceData};
pub use provider::{
    fetch_tx_info, select_alignment, DataProvider, SequenceProvider, TranscriptProvider,
};
pub use transcript::{
    ExonRecord, TranscriptAlignment, TranscriptRecord, TxInfo, TxMappingOption,
    DEFAULT_ALT_ALN_METHOD,
};
