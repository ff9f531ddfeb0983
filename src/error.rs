//! Error types.
//!
//! - `TrendError` is what the library pipeline returns. Each variant is a
//!   distinct, fatal condition the caller can match on.
//! - `AppError` is the binary boundary: a message plus a process exit code.

use thiserror::Error;

/// Fatal pipeline conditions.
///
/// Per-row problems (bad date, missing temperature) are never reported here;
/// those rows are dropped and only show up in the ingest counters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    /// The input could not be decoded as a table under either encoding.
    #[error("Could not read the input as a table: {primary_encoding}: {primary}; {fallback_encoding}: {fallback}")]
    Format {
        primary_encoding: String,
        primary: String,
        fallback_encoding: String,
        fallback: String,
    },

    /// A required column is absent from the header row.
    #[error("Missing required {column} column (expected one of: {expected}; found: {found})")]
    Schema {
        column: String,
        expected: String,
        found: String,
    },

    /// Fewer than two distinct years survived cleaning.
    #[error("{}", insufficient_message(.distinct_years))]
    InsufficientData { distinct_years: usize },

    /// The least-squares solve produced no finite coefficients.
    #[error("Trend fit failed: {0}")]
    DegenerateFit(String),
}

impl TrendError {
    /// True when cleaning left nothing at all (as opposed to a single year).
    pub fn is_no_data(&self) -> bool {
        matches!(self, TrendError::InsufficientData { distinct_years: 0 })
    }
}

fn insufficient_message(distinct_years: &usize) -> String {
    if *distinct_years == 0 {
        "No valid rows remain after cleaning; nothing to analyze.".to_string()
    } else {
        format!("Need at least 2 distinct years to fit a trend, found {distinct_years}.")
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<TrendError> for AppError {
    fn from(err: TrendError) -> Self {
        let exit_code = match err {
            TrendError::Format { .. } | TrendError::Schema { .. } => 2,
            TrendError::InsufficientData { .. } => 3,
            TrendError::DegenerateFit(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
