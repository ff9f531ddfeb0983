//! `temp-trend` library crate.
//!
//! The binary (`temp-trend`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the load/analyze pipeline can be driven by other front ends (web upload, notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
