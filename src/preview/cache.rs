//! Render cache for the preview pipeline.
//!
//! `RenderCache` stores rendered documents keyed by a hash of
//! `(filename, content)`, avoiding re-rendering unchanged files. Uses LRU
//! eviction when the cache is full.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};

use super::types::{InferredContentType, RenderedDocument};

/// Cache key for a file: a 64-bit hash of its name and content.
///
/// The filename takes part because it can change the result (extension
/// authority, error messages, headers).
pub fn content_key(filename: &str, content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    filename.hash(&mut hasher);
    content.hash(&mut hasher);
    hasher.finish()
}

/// Caches rendered documents to avoid re-rendering unchanged files.
pub struct RenderCache {
    entries: HashMap<u64, CacheEntry>,
    max_entries: usize,
    /// LRU tracking: most recently accessed keys at the back.
    access_order: VecDeque<u64>,
    hit_count: u64,
    miss_count: u64,
}

struct CacheEntry {
    document: RenderedDocument,
    content_type: InferredContentType,
}

impl RenderCache {
    /// Create a new render cache with the given maximum number of entries.
    /// A capacity of zero stores nothing.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            access_order: VecDeque::new(),
            hit_count: 0,
            miss_count: 0,
        }
    }

    /// Look up a cached document.
    pub fn get(&mut self, key: u64) -> Option<&RenderedDocument> {
        if self.entries.contains_key(&key) {
            self.hit_count += 1;
            self.touch(key);
            self.entries.get(&key).map(|e| &e.document)
        } else {
            self.miss_count += 1;
            None
        }
    }

    /// Content type recorded with a cached document, without touching LRU
    /// order or statistics.
    pub fn content_type(&self, key: u64) -> Option<InferredContentType> {
        self.entries.get(&key).map(|e| e.content_type)
    }

    /// Store a rendered document.
    pub fn put(&mut self, key: u64, content_type: InferredContentType, document: RenderedDocument) {
        if self.max_entries == 0 {
            return;
        }
        let entry = CacheEntry {
            document,
            content_type,
        };
        if self.entries.insert(key, entry).is_some() {
            self.touch(key);
            return;
        }
        if self.entries.len() > self.max_entries {
            self.evict_lru();
        }
        self.access_order.push_back(key);
    }

    /// Drop the entry for one key.
    pub fn invalidate(&mut self, key: u64) {
        self.entries.remove(&key);
        self.access_order.retain(|&k| k != key);
    }

    /// Clear all cached entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.access_order.clear();
        self.hit_count = 0;
        self.miss_count = 0;
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entries.len(),
            max_entries: self.max_entries,
            hit_count: self.hit_count,
            miss_count: self.miss_count,
        }
    }

    /// Move a key to the end of the access order (most recently used).
    fn touch(&mut self, key: u64) {
        if let Some(pos) = self.access_order.iter().position(|&k| k == key) {
            self.access_order.remove(pos);
        }
        self.access_order.push_back(key);
    }

    /// Evict the least recently used entry.
    fn evict_lru(&mut self) {
        if let Some(oldest) = self.access_order.pop_front() {
            self.entries.remove(&oldest);
        }
    }
}

/// Cache statistics for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of cached entries.
    pub entry_count: usize,
    /// Maximum number of cached entries.
    pub max_entries: usize,
    /// Number of cache hits.
    pub hit_count: u64,
    /// Number of cache misses.
    pub miss_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> RenderedDocument {
        RenderedDocument::new(text.to_string())
    }

    #[test]
    fn test_cache_miss_then_hit() {
        let mut cache = RenderCache::new(10);
        let key = content_key("a.md", "# hi");

        assert!(cache.get(key).is_none());
        assert_eq!(cache.stats().miss_count, 1);

        cache.put(key, InferredContentType::Markdown, doc("hello"));

        assert_eq!(cache.get(key).map(|d| d.as_str()), Some("hello"));
        assert_eq!(cache.stats().hit_count, 1);
        assert_eq!(cache.content_type(key), Some(InferredContentType::Markdown));
    }

    #[test]
    fn test_key_includes_filename() {
        assert_ne!(content_key("a.json", "{}"), content_key("a.txt", "{}"));
        assert_eq!(content_key("a.json", "{}"), content_key("a.json", "{}"));
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = RenderCache::new(2);
        cache.put(1, InferredContentType::Text, doc("first"));
        cache.put(2, InferredContentType::Text, doc("second"));

        // Touch 1 so 2 becomes least recently used.
        assert!(cache.get(1).is_some());
        cache.put(3, InferredContentType::Text, doc("third"));

        assert!(cache.get(2).is_none());
        assert!(cache.get(1).is_some());
        assert!(cache.get(3).is_some());
        assert_eq!(cache.stats().entry_count, 2);
    }

    #[test]
    fn test_update_existing_does_not_evict() {
        let mut cache = RenderCache::new(2);
        cache.put(1, InferredContentType::Text, doc("a"));
        cache.put(2, InferredContentType::Text, doc("b"));
        cache.put(1, InferredContentType::Text, doc("a2"));
        assert_eq!(cache.stats().entry_count, 2);
        assert_eq!(cache.get(1).map(|d| d.as_str()), Some("a2"));
    }

    #[test]
    fn test_invalidate_and_clear() {
        let mut cache = RenderCache::new(4);
        cache.put(1, InferredContentType::Text, doc("a"));
        cache.put(2, InferredContentType::Text, doc("b"));
        cache.invalidate(1);
        assert!(cache.get(1).is_none());
        assert_eq!(cache.stats().entry_count, 1);

        cache.clear();
        let stats = cache.stats();
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.hit_count, 0);
        assert_eq!(stats.miss_count, 0);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = RenderCache::new(0);
        cache.put(1, InferredContentType::Text, doc("a"));
        assert!(cache.get(1).is_none());
    }
}
