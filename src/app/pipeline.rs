//! The load → analyze pipeline shared by every front end.
//!
//! `run` is a pure function of the input bytes and the load options: calling
//! it twice on the same bytes yields identical output. Memoization lives
//! outside, in `app::cache`.

use crate::domain::Analysis;
use crate::error::TrendError;
use crate::fit::analyze;
use crate::io::ingest::{LoadOptions, LoadedTable, load_with};

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub table: LoadedTable,
    pub analysis: Analysis,
}

/// Load, clean and analyze one uploaded table.
pub fn run(bytes: &[u8], options: &LoadOptions) -> Result<RunOutput, TrendError> {
    let table = load_with(bytes, options)?;
    let analysis = analyze(&table.records)?;
    Ok(RunOutput { table, analysis })
}
