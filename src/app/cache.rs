//! Memoization of pipeline runs keyed by input content.
//!
//! The pipeline itself knows nothing about caching. A front end that may see
//! the same upload more than once keeps an `AnalysisCache`: the key is the
//! SHA-256 of the raw bytes and the value is the complete `RunOutput`, shared
//! as one immutable unit. Failed runs are not cached.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::app::pipeline::{self, RunOutput};
use crate::error::TrendError;
use crate::io::ingest::LoadOptions;

/// Content fingerprint of an uploaded byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Content-addressed store of pipeline outputs.
///
/// The load options are fixed at construction so the bytes alone determine
/// the output.
#[derive(Debug)]
pub struct AnalysisCache {
    options: LoadOptions,
    entries: HashMap<Fingerprint, Arc<RunOutput>>,
}

impl AnalysisCache {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
        }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    pub fn get(&self, bytes: &[u8]) -> Option<Arc<RunOutput>> {
        self.entries.get(&Fingerprint::of(bytes)).cloned()
    }

    /// Return the cached output for `bytes`, running the pipeline on a miss.
    pub fn get_or_run(&mut self, bytes: &[u8]) -> Result<Arc<RunOutput>, TrendError> {
        let key = Fingerprint::of(bytes);
        if let Some(hit) = self.entries.get(&key) {
            tracing::debug!(fingerprint = %key, "analysis cache hit");
            return Ok(Arc::clone(hit));
        }

        tracing::debug!(fingerprint = %key, bytes = bytes.len(), "analysis cache miss");
        let output = Arc::new(pipeline::run(bytes, &self.options)?);
        self.entries.insert(key, Arc::clone(&output));
        Ok(output)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_YEARS: &str = "date,temperature\n2000-01-01,1.0\n2001-01-01,2.0\n";

    #[test]
    fn fingerprint_is_sha256_hex() {
        assert_eq!(
            Fingerprint::of(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_ne!(Fingerprint::of(b"a"), Fingerprint::of(b"b"));
    }

    #[test]
    fn second_lookup_returns_the_same_output() {
        let mut cache = AnalysisCache::new(LoadOptions::default());
        assert!(cache.get(TWO_YEARS.as_bytes()).is_none());

        let first = cache.get_or_run(TWO_YEARS.as_bytes()).unwrap();
        let second = cache.get_or_run(TWO_YEARS.as_bytes()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(*first, pipeline::run(TWO_YEARS.as_bytes(), cache.options()).unwrap());
    }

    #[test]
    fn different_content_gets_its_own_entry() {
        let mut cache = AnalysisCache::new(LoadOptions::default());
        cache.get_or_run(TWO_YEARS.as_bytes()).unwrap();
        let other = format!("{TWO_YEARS}2002-01-01,3.0\n");
        let out = cache.get_or_run(other.as_bytes()).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(out.analysis.annual_means.len(), 3);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = AnalysisCache::new(LoadOptions::default());
        let single_year = b"date,temperature\n2000-01-01,1.0\n";

        assert!(cache.get_or_run(single_year).is_err());
        assert!(cache.get_or_run(single_year).is_err());
        assert!(cache.is_empty());
    }
}
