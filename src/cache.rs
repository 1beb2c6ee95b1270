// src/cache.rs
//! Caller-owned result cache keyed by document content.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::analysis::Engine;
use crate::error::ParseError;
use crate::types::ProcessAnalysis;

/// Hex SHA-256 of the exact document bytes.
#[must_use]
pub fn content_digest(document: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Memoizes successful analyses by content digest.
///
/// The engine never consults a cache on its own; callers create one, pass it
/// where they want reuse and drop or [`clear`](AnalysisCache::clear) it to
/// invalidate. Failures are not cached. Results are only valid for the engine
/// configuration they were produced with.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: RwLock<HashMap<String, Arc<ProcessAnalysis>>>,
}

impl AnalysisCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached analysis for `document`, analyzing it on a miss.
    ///
    /// # Errors
    /// Returns the extraction failure from [`Engine::analyze`].
    pub fn get_or_analyze(
        &self,
        engine: &Engine,
        document: &str,
    ) -> Result<Arc<ProcessAnalysis>, ParseError> {
        let key = content_digest(document);
        if let Some(hit) = self.get(&key) {
            debug!(digest = %key, "cache hit");
            return Ok(hit);
        }

        let analysis = Arc::new(engine.analyze(document)?);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(entries.entry(key).or_insert(analysis)))
    }

    #[must_use]
    pub fn get(&self, digest: &str) -> Option<Arc<ProcessAnalysis>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(digest).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
