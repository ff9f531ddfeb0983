//! Text decoding with a single legacy fallback.
//!
//! Uploaded tables are either UTF-8 or a region-specific legacy encoding
//! (Korean weather exports are typically cp949). Decoding is strict: a byte
//! sequence that is invalid in an encoding fails that attempt instead of being
//! patched with replacement characters.

use std::borrow::Cow;

use encoding_rs::{EUC_KR, Encoding, UTF_8};

use crate::error::AppError;

/// Label used when no fallback is configured.
pub const DEFAULT_FALLBACK_ENCODING: &str = "cp949";

/// Resolve an encoding label.
///
/// `cp949` and friends are not WHATWG labels, but `encoding_rs::EUC_KR` is the
/// Windows-949 superset, so they map there.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, AppError> {
    let label = label.trim();
    match label.to_ascii_lowercase().as_str() {
        "cp949" | "ms949" | "uhc" => return Ok(EUC_KR),
        _ => {}
    }
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| AppError::new(2, format!("Unknown text encoding: `{label}`")))
}

/// The primary encoding every input is tried with first.
pub fn primary_encoding() -> &'static Encoding {
    UTF_8
}

/// Strictly decode `bytes`, returning `None` on any malformed sequence.
///
/// A UTF-8 byte order mark is kept in the text; header normalization strips it.
pub fn decode_strict<'a>(encoding: &'static Encoding, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
    encoding.decode_without_bom_handling_and_without_replacement(bytes)
}
