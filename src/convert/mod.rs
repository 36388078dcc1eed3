//! Coordinate conversion
//!
//! Conversion between CDS (c.) and transcript (n.) numbering, applied before
//! and after normalizing c. variants.

pub mod mapper;

pub use mapper::{cds_to_tx_pos, tx_to_cds_pos, CdsMapper, CoordinateMapper};
