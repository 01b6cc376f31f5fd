//! Memoized analyses keyed by document and window size.
//!
//! The pipeline itself is stateless. A host that re-requests the same
//! document at the same window size (a UI re-rendering after a filter change,
//! for example) keeps an [`AnalysisCache`] and asks it instead. Removing a
//! document must be followed by [`AnalysisCache::invalidate`].
//!
//! Entries are keyed only by `(document, window_size)`: a cache must not be
//! shared between pipelines whose other settings differ.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::runner::{Analysis, Pipeline};
use crate::errors::Result;

/// Host-chosen document identity (file name, upload ID, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Cache of finished analyses.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: FxHashMap<(DocumentId, usize), Arc<Analysis>>,
    hits: u64,
    misses: u64,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached analysis for `id` at the pipeline's window size,
    /// computing and storing it on a miss.
    ///
    /// Failed analyses are not cached.
    pub fn get_or_analyze(
        &mut self,
        pipeline: &Pipeline,
        id: &DocumentId,
        text: &str,
    ) -> Result<Arc<Analysis>> {
        let key = (id.clone(), pipeline.config().window_size);
        if let Some(found) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(Arc::clone(found));
        }

        self.misses += 1;
        tracing::debug!(document = %id, window_size = key.1, "analysis cache miss");
        let analysis = Arc::new(pipeline.analyze(text)?);
        self.entries.insert(key, Arc::clone(&analysis));
        Ok(analysis)
    }

    pub fn get(&self, id: &DocumentId, window_size: usize) -> Option<Arc<Analysis>> {
        self.entries.get(&(id.clone(), window_size)).cloned()
    }

    pub fn contains(&self, id: &DocumentId, window_size: usize) -> bool {
        self.entries.contains_key(&(id.clone(), window_size))
    }

    /// Drop every entry for `id`, at all window sizes. Returns how many were removed.
    pub fn invalidate(&mut self, id: &DocumentId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(doc, _), _| doc != id);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Distinct documents with at least one entry, sorted
    pub fn documents(&self) -> Vec<&DocumentId> {
        let mut docs: Vec<_> = self.entries.keys().map(|(doc, _)| doc).collect();
        docs.sort();
        docs.dedup();
        docs
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnalysisConfig;

    const TEXT: &str = "graph ranking nodes edges graph centrality nodes ranking";

    fn pipeline(window: usize) -> Pipeline {
        Pipeline::new(
            AnalysisConfig::default()
                .with_language("en")
                .with_window_size(window),
        )
        .unwrap()
    }

    #[test]
    fn test_hit_returns_same_analysis() {
        let mut cache = AnalysisCache::new();
        let p = pipeline(2);
        let id = DocumentId::from("paper.pdf");

        let first = cache.get_or_analyze(&p, &id, TEXT).unwrap();
        let second = cache.get_or_analyze(&p, &id, TEXT).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_window_size_is_part_of_key() {
        let mut cache = AnalysisCache::new();
        let id = DocumentId::from("paper.pdf");

        cache.get_or_analyze(&pipeline(2), &id, TEXT).unwrap();
        cache.get_or_analyze(&pipeline(3), &id, TEXT).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&id, 2));
        assert!(cache.contains(&id, 3));
        assert_eq!(cache.get(&id, 3).unwrap().window_size(), 3);
        assert_eq!(cache.documents(), vec![&id]);
    }

    #[test]
    fn test_invalidate_removes_all_windows() {
        let mut cache = AnalysisCache::new();
        let a = DocumentId::from("a.pdf");
        let b = DocumentId::from("b.pdf");

        cache.get_or_analyze(&pipeline(1), &a, TEXT).unwrap();
        cache.get_or_analyze(&pipeline(2), &a, TEXT).unwrap();
        cache.get_or_analyze(&pipeline(2), &b, TEXT).unwrap();

        assert_eq!(cache.invalidate(&a), 2);
        assert!(!cache.contains(&a, 1));
        assert!(cache.contains(&b, 2));
        assert_eq!(cache.invalidate(&a), 0);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_errors_not_cached() {
        let mut cache = AnalysisCache::new();
        let id = DocumentId::from("empty.pdf");

        assert!(cache.get_or_analyze(&pipeline(2), &id, "").is_err());
        assert!(cache.is_empty());
    }
}
