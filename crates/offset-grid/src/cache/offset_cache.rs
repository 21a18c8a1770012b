//! LRU cache for sampled offsets.

use lru::LruCache;
use std::num::NonZeroUsize;

use crate::types::{CacheStats, Sample};

/// Cache key for offsets: coordinate quantized to micro-degrees.
pub type OffsetKey = (i64, i64);

/// Entry-bounded LRU cache of samples.
pub struct OffsetCache {
    cache: LruCache<OffsetKey, Sample>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl OffsetCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Try to get a sample from the cache.
    pub fn get(&mut self, key: &OffsetKey) -> Option<Sample> {
        if let Some(sample) = self.cache.get(key) {
            self.hits += 1;
            Some(*sample)
        } else {
            self.misses += 1;
            None
        }
    }

    /// Insert a sample, evicting the least recently used entry if full.
    pub fn insert(&mut self, key: OffsetKey, sample: Sample) {
        if let Some((evicted_key, _)) = self.cache.push(key, sample) {
            // push hands back the old value when the key was already present
            if evicted_key != key {
                self.evictions += 1;
            }
        }
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.cache.len(),
            capacity: self.cache.cap().get(),
            evictions: self.evictions,
        }
    }

    /// Clear all entries from the cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
