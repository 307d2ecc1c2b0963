//! Concurrency-safe compute-once cache.
//!
//! Keyed by raw input bytes; many request-handling workers may look up the
//! same key simultaneously. The entry API guarantees a single computation per
//! key under contention, which is a performance guarantee, not a correctness
//! one: results for equal keys are always equal.

use dashmap::DashMap;
use std::sync::Arc;

/// A shared map from input text to its compiled form.
///
/// Used as the whole-pattern compile cache and offered to expression engines
/// for their parsed-tree cache. Always injected explicitly so lifetime and
/// test isolation stay visible at the call site.
#[derive(Debug)]
pub struct Cache<V> {
    map: DashMap<String, Arc<V>>,
}

impl<V> Default for Cache<V> {
    fn default() -> Self {
        Self {
            map: DashMap::new(),
        }
    }
}

impl<V> Cache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing and inserting it first if
    /// absent. Byte-identical keys always yield the same `Arc`.
    pub fn get_or_compute(&self, key: &str, compute: impl FnOnce(&str) -> V) -> Arc<V> {
        if let Some(hit) = self.map.get(key) {
            return Arc::clone(&hit);
        }
        Arc::clone(
            &self
                .map
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(compute(key))),
        )
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn identical_keys_share_one_computation() {
        let cache: Cache<String> = Cache::new();
        let calls = AtomicUsize::new(0);
        let compute = |key: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            key.to_uppercase()
        };

        let a = cache.get_or_compute("/api/*", compute);
        let b = cache.get_or_compute("/api/*", compute);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_keys_compute_independently() {
        let cache: Cache<usize> = Cache::new();
        let a = cache.get_or_compute("a", str::len);
        let b = cache.get_or_compute("bb", str::len);
        assert_eq!((*a, *b), (1, 2));
        assert_eq!(cache.len(), 2);
    }
}
