//! Input/output helpers.
//!
//! - strict text decoding with a legacy fallback (`decode`)
//! - CSV ingest + cleaning (`ingest`)
//! - chart CSV and analysis JSON exports (`export`)

pub mod decode;
pub mod export;
pub mod ingest;

pub use decode::*;
pub use export::*;
pub use ingest::*;
