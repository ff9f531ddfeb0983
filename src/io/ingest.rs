//! CSV ingest and cleaning.
//!
//! This module turns an uploaded byte stream into the clean set of
//! `(date, temperature, year)` records the analyzer works on.
//!
//! Design goals:
//! - **Strict schema** for the two required columns (fail fast with `Schema`)
//! - **Soft row-level failures** (bad rows are dropped and only counted)
//! - **Deterministic behavior** (fixed date formats, no locale guessing)
//! - **Separation of concerns**: no aggregation or fitting here

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use encoding_rs::{EUC_KR, Encoding};

use crate::domain::CleanedRecord;
use crate::error::TrendError;
use crate::io::decode::{decode_strict, primary_encoding};

/// Accepted (normalized) names of the date column.
pub const DATE_COLUMNS: [&str; 2] = ["날짜", "date"];

/// Accepted (normalized) names of the mean daily temperature column.
pub const TEMPERATURE_COLUMNS: [&str; 2] = ["평균기온(℃)", "temperature"];

/// Loader settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Encoding retried once when the primary (UTF-8) attempt fails.
    pub fallback_encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            fallback_encoding: EUC_KR,
        }
    }
}

/// Ingest output: cleaned records plus what happened on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub records: Vec<CleanedRecord>,
    /// Name of the encoding the table was decoded with.
    pub encoding: String,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl LoadedTable {
    pub fn rows_used(&self) -> usize {
        self.records.len()
    }
}

/// Load and clean a table using the default options.
pub fn load(bytes: &[u8]) -> Result<LoadedTable, TrendError> {
    load_with(bytes, &LoadOptions::default())
}

/// Load and clean a table.
///
/// Decoding is attempted exactly twice: UTF-8, then `options.fallback_encoding`.
/// An empty result is not an error here; the analyzer decides what to do with it.
pub fn load_with(bytes: &[u8], options: &LoadOptions) -> Result<LoadedTable, TrendError> {
    let primary = primary_encoding();
    let fallback = options.fallback_encoding;

    let (table, encoding) = match read_table(primary, bytes) {
        Ok(table) => (table, primary),
        Err(primary_err) => match read_table(fallback, bytes) {
            Ok(table) => (table, fallback),
            Err(fallback_err) => {
                return Err(TrendError::Format {
                    primary_encoding: primary.name().to_string(),
                    primary: primary_err,
                    fallback_encoding: fallback.name().to_string(),
                    fallback: fallback_err,
                });
            }
        },
    };

    let header_map = build_header_map(&table.headers);
    let date_idx = require_column(&header_map, &table.headers, "date", &DATE_COLUMNS)?;
    let temp_idx = require_column(&header_map, &table.headers, "temperature", &TEMPERATURE_COLUMNS)?;

    let rows_read = table.rows.len();
    let records: Vec<CleanedRecord> = table
        .rows
        .iter()
        .filter_map(|row| row.as_ref())
        .filter_map(|record| clean_row(record, date_idx, temp_idx))
        .collect();

    Ok(LoadedTable {
        rows_dropped: rows_read - records.len(),
        records,
        encoding: encoding.name().to_string(),
        rows_read,
    })
}

/// A decoded table before schema validation.
///
/// Rows that the CSV reader rejected are kept as `None` so they still count
/// as read.
struct RawTable {
    headers: StringRecord,
    rows: Vec<Option<StringRecord>>,
}

fn read_table(encoding: &'static Encoding, bytes: &[u8]) -> Result<RawTable, String> {
    let text = decode_strict(encoding, bytes)
        .ok_or_else(|| format!("invalid {} byte sequence", encoding.name()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("failed to read header row: {e}"))?
        .clone();

    if headers.iter().all(|h| normalize_header_name(h).is_empty()) {
        return Err("no header row".to_string());
    }

    let rows = reader.records().map(Result::ok).collect();

    Ok(RawTable { headers, rows })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for duplicated header names.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}').trim();
    name.to_lowercase()
}

fn require_column(
    header_map: &HashMap<String, usize>,
    headers: &StringRecord,
    column: &str,
    candidates: &[&str],
) -> Result<usize, TrendError> {
    candidates
        .iter()
        .find_map(|name| header_map.get(*name).copied())
        .ok_or_else(|| TrendError::Schema {
            column: column.to_string(),
            expected: candidates
                .iter()
                .map(|c| format!("`{c}`"))
                .collect::<Vec<_>>()
                .join(", "),
            found: headers
                .iter()
                .map(|h| format!("`{}`", h.trim_start_matches('\u{feff}')))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn clean_row(record: &StringRecord, date_idx: usize, temp_idx: usize) -> Option<CleanedRecord> {
    let date = record.get(date_idx).and_then(parse_date)?;
    let temperature = record.get(temp_idx).and_then(parse_temperature)?;
    Some(CleanedRecord {
        date,
        temperature,
        year: date.year(),
    })
}

/// Parse a calendar date without any locale-dependent guessing.
///
/// The value must start with a four-digit year (or be a compact `YYYYMMDD`).
/// Explicit formats are tried first; date-time (optionally with fractional
/// seconds), RFC 3339, bare-year and year-month forms are accepted only as a
/// best-effort fallback. Two-digit years and
/// `DD/MM/YYYY`-style values are rejected because they are ambiguous.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if !has_full_year(s) {
        return None;
    }

    const FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    parse_date_best_effort(s)
}

fn parse_date_best_effort(s: &str) -> Option<NaiveDate> {
    // `%.f` also matches when there is no fractional part.
    const DATETIME_FMTS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S%.f",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // Calendar date as written; the offset is not applied.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    // Bare year: January 1st.
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }

    // Year-month only: first day of the month.
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
}

fn has_full_year(s: &str) -> bool {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    digits == 4 || (digits == 8 && s.len() == 8)
}

/// Parse a temperature reading; empty, unparseable and non-finite values are missing.
pub fn parse_temperature(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
