// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::{
    compiler::{compile, CompiledPattern},
    error::SyntaxError,
    matcher::{search, MatchResult},
};

pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 256;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CacheConfig {
    /// The cache is cleared before inserting when it already holds this many patterns.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

/// A thread-safe cache of compiled patterns, keyed by pattern text.
///
/// Cloning is cheap and the clones share the same entries.
#[derive(Debug, Clone)]
pub struct RegexCache {
    inner: Arc<DashMap<String, Arc<CompiledPattern>>>,
    config: CacheConfig,
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexCache {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Return the cached pattern, or compile and cache it.
    ///
    /// A pattern which fails to compile is not cached.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<CompiledPattern>, SyntaxError> {
        if let Some(entry) = self.inner.get(pattern) {
            trace!(pattern, "pattern cache hit");
            return Ok(Arc::clone(entry.value()));
        }

        trace!(pattern, "pattern cache miss");
        let compiled = Arc::new(compile(pattern)?);

        if self.inner.len() >= self.config.max_entries {
            debug!(entries = self.inner.len(), "pattern cache is full, clearing");
            self.inner.clear();
        }

        // another thread may have inserted the same pattern meanwhile
        let entry = self
            .inner
            .entry(pattern.to_owned())
            .or_insert_with(|| compiled);
        Ok(Arc::clone(entry.value()))
    }

    pub fn search(&self, pattern: &str, input: &str) -> Result<MatchResult, SyntaxError> {
        let compiled = self.get_or_compile(pattern)?;
        Ok(search(&compiled, input))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use crate::{error::SyntaxErrorReason, matcher::MatchResult};

    use super::{CacheConfig, RegexCache, DEFAULT_CACHE_MAX_ENTRIES};

    #[test]
    fn test_cache_get_or_compile() {
        let cache = RegexCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.config().max_entries, DEFAULT_CACHE_MAX_ENTRIES);

        let first = cache.get_or_compile(r#"\b[0-9]{5}\b"#).unwrap();
        let second = cache.get_or_compile(r#"\b[0-9]{5}\b"#).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        let other = cache.get_or_compile("quick").unwrap();
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(cache.len(), 2);

        // clones share entries
        let shared = cache.clone();
        assert!(Arc::ptr_eq(&shared.get_or_compile("quick").unwrap(), &other));

        cache.clear();
        assert!(shared.is_empty());
    }

    #[test]
    fn test_cache_failure_not_cached() {
        let cache = RegexCache::new();

        let err = cache.get_or_compile(r#"[a-z"#).unwrap_err();
        assert_eq!(err.reason, SyntaxErrorReason::UnclosedCharClass);
        assert!(cache.is_empty());

        assert!(cache.search(r#"(ab"#, "ab").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_search() {
        let cache = RegexCache::new();
        let text = "The quick brown fox jumps over the lazy dog";

        assert_eq!(cache.search("quick", text), Ok(MatchResult::Found(4)));
        assert_eq!(cache.search(r#"[a-z]{5}\b"#, text), Ok(MatchResult::Found(4)));
        assert_eq!(cache.search("xyz123", text), Ok(MatchResult::NotFound));
        assert_eq!(cache.search("quick", "slow"), Ok(MatchResult::NotFound));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_cache_clear_when_full() {
        let cache = RegexCache::with_config(CacheConfig { max_entries: 2 });

        cache.get_or_compile("a").unwrap();
        cache.get_or_compile("b").unwrap();
        assert_eq!(cache.len(), 2);

        // hits do not evict
        cache.get_or_compile("a").unwrap();
        assert_eq!(cache.len(), 2);

        cache.get_or_compile("c").unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.search("c", "abc"), Ok(MatchResult::Found(2)));
    }

    #[test]
    fn test_cache_shared_between_threads() {
        let cache = RegexCache::new();
        let pattern = r#"\b[0-9]{5}(?:-[0-9]{4})?\b"#;

        let compiled: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        assert_eq!(
                            cache.search(pattern, "my zip is 01720-1234 what is yours?"),
                            Ok(MatchResult::Found(10))
                        );
                        cache.get_or_compile(pattern).unwrap()
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        assert_eq!(cache.len(), 1);
        assert!(compiled.iter().all(|item| Arc::ptr_eq(item, &compiled[0])));
    }
}
