//! Synonym expansion with a process-lifetime cache.
//!
//! The cache is built once at startup and shared by every scoring call. Entries
//! are immutable once written, and a failed lookup is cached as an empty entry so
//! the same term is never retried within the process.

use std::collections::{HashMap, HashSet, VecDeque};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::matching::tokenizer::tokenize;
use crate::synonym_client::SynonymError;

/// Candidates kept per looked-up term.
pub const MAX_SYNONYMS: usize = 5;

/// Anything that can answer "words related to `term`", best first.
///
/// Carried by the expander as `Arc<dyn SynonymSource>`.
#[async_trait]
pub trait SynonymSource: Send + Sync {
    async fn related_words(&self, term: &str) -> Result<Vec<String>, SynonymError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Cache
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, Arc<[String]>>,
    /// Insertion order, oldest first. Only consulted when a capacity is set.
    order: VecDeque<String>,
}

/// Term → related words. Unbounded unless a capacity is given, in which case
/// the oldest entry is evicted to make room.
pub struct SynonymCache {
    capacity: Option<NonZeroUsize>,
    inner: RwLock<CacheInner>,
}

impl SynonymCache {
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        Self {
            capacity,
            inner: RwLock::new(CacheInner::default()),
        }
    }

    #[allow(dead_code)]
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub async fn get(&self, term: &str) -> Option<Arc<[String]>> {
        self.inner.read().await.entries.get(term).cloned()
    }

    /// Stores `words` for `term` unless another caller got there first, and
    /// returns whichever entry is now authoritative.
    pub async fn insert(&self, term: &str, words: Vec<String>) -> Arc<[String]> {
        let words: Arc<[String]> = words.into();
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.entries.get(term) {
            return existing.clone();
        }

        if let Some(capacity) = self.capacity {
            while inner.entries.len() >= capacity.get() {
                match inner.order.pop_front() {
                    Some(oldest) => {
                        inner.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
            inner.order.push_back(term.to_string());
        }

        inner.entries.insert(term.to_string(), words.clone());
        words
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Expander
// ────────────────────────────────────────────────────────────────────────────

pub struct SynonymExpander {
    source: Arc<dyn SynonymSource>,
    cache: Arc<SynonymCache>,
    lookup_timeout: Duration,
}

impl SynonymExpander {
    pub fn new(
        source: Arc<dyn SynonymSource>,
        cache: Arc<SynonymCache>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            source,
            cache,
            lookup_timeout,
        }
    }

    pub fn cache(&self) -> &SynonymCache {
        &self.cache
    }

    /// Related words for one lowercase term, from the cache or the source.
    /// Never fails: lookup errors and timeouts become an empty, cached entry.
    ///
    /// The first five candidates are run through the document tokenizer, so a
    /// phrase like "web framework" contributes `web` and `framework`.
    pub async fn synonyms_for(&self, term: &str) -> Arc<[String]> {
        if let Some(hit) = self.cache.get(term).await {
            return hit;
        }

        let lookup = tokio::time::timeout(self.lookup_timeout, self.source.related_words(term))
            .await
            .unwrap_or(Err(SynonymError::Timeout(self.lookup_timeout)));

        let words = match lookup {
            Ok(candidates) => {
                let mut seen = HashSet::new();
                candidates
                    .iter()
                    .take(MAX_SYNONYMS)
                    .flat_map(|candidate| tokenize(candidate))
                    .filter(|word| seen.insert(word.clone()))
                    .collect()
            }
            Err(e) => {
                warn!("Synonym lookup for '{term}' failed, continuing without synonyms: {e}");
                Vec::new()
            }
        };

        self.cache.insert(term, words).await
    }

    /// Returns `tokens` followed by every synonym of its distinct terms that is
    /// not already present. Original repetitions are kept; each synonym is added once.
    pub async fn expand(&self, tokens: &[String]) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::with_capacity(tokens.len());
        let mut distinct = Vec::new();
        for token in tokens {
            if seen.insert(token.clone()) {
                distinct.push(token.as_str());
            }
        }

        let mut expanded = tokens.to_vec();
        for term in distinct {
            for word in self.synonyms_for(term).await.iter() {
                if seen.insert(word.clone()) {
                    expanded.push(word.clone());
                }
            }
        }

        debug!(
            "Expanded {} tokens to {} with synonyms",
            tokens.len(),
            expanded.len()
        );
        expanded
    }
}
