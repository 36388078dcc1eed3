//! HGVS variant types
//!
//! Structured representation of nucleic acid variants. Variants are built
//! directly or deserialized from JSON; textual HGVS parsing is not part of
//! this crate.

pub mod edit;
pub mod location;
pub mod variant;

// Re-export commonly used types
pub use edit::{is_nucleotide_sequence, EditKind, NaEdit};
pub use location::{Interval, Position};
pub use variant::{CoordinateType, Variant};
