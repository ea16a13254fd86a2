//! Memo of compiled patterns.
//!
//! # Design Decisions
//! - Keyed by the lowercased pattern, so `Example.com` and `example.com` share an entry
//! - Concurrent readers through `DashMap`, no global lock
//! - Bounded: the map is cleared when it reaches capacity
//! - Compilation errors are not cached

use std::sync::Arc;

use dashmap::DashMap;

use crate::observability::metrics;
use crate::pattern::compiler::{CompiledPattern, PatternError};

const DEFAULT_CAPACITY: usize = 1024;

/// Thread-safe cache of compiled patterns.
#[derive(Debug)]
pub struct PatternCache {
    inner: DashMap<String, Arc<CompiledPattern>>,
    capacity: usize,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Return the compiled form of `pattern`, compiling it on first use.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<CompiledPattern>, PatternError> {
        let key = pattern.to_lowercase();
        if let Some(hit) = self.inner.get(&key) {
            return Ok(Arc::clone(hit.value()));
        }

        let compiled = Arc::new(CompiledPattern::compile(&key)?);

        if self.inner.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "Pattern cache full, clearing");
            self.inner.clear();
        }
        self.inner.insert(key, Arc::clone(&compiled));
        metrics::record_pattern_cache_size(self.inner.len());

        Ok(compiled)
    }

    /// Number of cached patterns.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drop every cached pattern.
    pub fn clear(&self) {
        self.inner.clear();
        metrics::record_pattern_cache_size(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_shares_compiled_pattern() {
        let cache = PatternCache::new();
        let first = cache.get_or_compile("Example.com").unwrap();
        let second = cache.get_or_compile("example.COM").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_is_bounded() {
        let cache = PatternCache::with_capacity(2);
        cache.get_or_compile("a.com").unwrap();
        cache.get_or_compile("b.com").unwrap();
        cache.get_or_compile("c.com").unwrap();

        assert!(cache.len() <= 2);
        assert!(cache.get_or_compile("c.com").is_ok());
    }

    #[test]
    fn test_clear() {
        let cache = PatternCache::new();
        cache.get_or_compile("a.com").unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
