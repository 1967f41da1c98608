//! Cache Store Module
//!
//! Bounded image cache: HashMap storage, FIFO eviction and a fixed TTL.

use std::collections::HashMap;

use bytes::Bytes;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};

// == Cache Store ==
/// Bounded, time-limited map from target URL to fetched image.
///
/// Keys are the literal URLs callers sent, so two spellings of the same
/// resource are cached independently.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    order: InsertionOrder,
    stats: CacheStats,
    max_entries: usize,
    ttl: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of images held at once
    /// * `ttl` - Seconds an image stays fresh after insertion
    pub fn new(max_entries: usize, ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
        }
    }

    // == Put ==
    /// Stores an image under `key`, stamped with the current time.
    ///
    /// Overwriting an existing key never evicts. Inserting a new key into a
    /// full store first removes the earliest inserted entry. Returns the
    /// evicted key, if any.
    pub fn put(&mut self, key: String, payload: Bytes, content_type: String) -> Option<String> {
        if self.max_entries == 0 {
            return None;
        }

        let mut evicted = None;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            if let Some(oldest) = self.order.evict_oldest() {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
                evicted = Some(oldest);
            }
        }

        self.entries
            .insert(key.clone(), CacheEntry::new(payload, content_type));
        self.order.record_insert(&key);

        self.stats.record_store();
        self.stats.set_total_entries(self.entries.len());

        evicted
    }

    // == Get ==
    /// Returns the entry for `key` if present and still fresh.
    ///
    /// A stale entry is removed and reported as a miss. Reads do not change
    /// eviction order.
    pub fn get(&mut self, key: &str) -> Option<CacheEntry> {
        let ttl = self.ttl;
        let fresh = self
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired(ttl))
            .cloned();

        if fresh.is_some() {
            self.stats.record_hit();
        } else {
            if self.entries.contains_key(key) {
                self.remove(key);
                self.stats.record_expirations(1);
            }
            self.stats.record_miss();
        }

        fresh
    }

    /// Whether a fresh entry exists for `key`, without touching the counters.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(self.ttl))
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Clear ==
    /// Drops every entry and returns how many were held.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
        count
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.order.remove(key);
        self.stats.set_total_entries(self.entries.len());
        debug_assert_eq!(self.entries.len(), self.order.len());
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn put(store: &mut CacheStore, key: &str) -> Option<String> {
        store.put(
            key.to_string(),
            Bytes::from(format!("bytes of {key}")),
            "image/jpeg".to_string(),
        )
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100, 1800);
        assert!(store.is_empty());
        assert_eq!(store.max_entries(), 100);
        assert_eq!(store.ttl(), 1800);
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = CacheStore::new(100, 1800);

        put(&mut store, "https://i0.example/a.jpg");
        let entry = store.get("https://i0.example/a.jpg").unwrap();

        assert_eq!(entry.payload.as_ref(), b"bytes of https://i0.example/a.jpg");
        assert_eq!(entry.content_type, "image/jpeg");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_missing() {
        let mut store = CacheStore::new(100, 1800);
        assert!(store.get("https://i0.example/none.jpg").is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_keys_are_not_normalized() {
        let mut store = CacheStore::new(100, 1800);

        put(&mut store, "http://i0.example/a.jpg");

        assert!(store.get("https://i0.example/a.jpg").is_none());
        assert!(store.get("http://i0.example/a.jpg").is_some());
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100, 1800);

        put(&mut store, "k");
        store.put("k".to_string(), Bytes::from_static(b"new"), "image/webp".to_string());

        let entry = store.get("k").unwrap();
        assert_eq!(entry.payload.as_ref(), b"new");
        assert_eq!(entry.content_type, "image/webp");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(100, 1);

        put(&mut store, "k");
        assert!(store.get("k").is_some());

        sleep(Duration::from_millis(1100));

        assert!(!store.contains("k"));
        assert!(store.get("k").is_none());
        assert!(store.is_empty());
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_fifo_eviction() {
        let mut store = CacheStore::new(3, 1800);

        put(&mut store, "a");
        put(&mut store, "b");
        put(&mut store, "c");

        let evicted = put(&mut store, "d");

        assert_eq!(evicted, Some("a".to_string()));
        assert_eq!(store.len(), 3);
        assert!(store.get("a").is_none());
        assert!(store.get("b").is_some());
        assert!(store.get("c").is_some());
        assert!(store.get("d").is_some());
    }

    #[test]
    fn test_reads_do_not_refresh_position() {
        let mut store = CacheStore::new(3, 1800);

        put(&mut store, "a");
        put(&mut store, "b");
        put(&mut store, "c");

        // Reading "a" would save it under LRU; FIFO still evicts it
        assert!(store.get("a").is_some());
        assert_eq!(put(&mut store, "d"), Some("a".to_string()));
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut store = CacheStore::new(2, 1800);

        put(&mut store, "a");
        put(&mut store, "b");

        assert_eq!(put(&mut store, "a"), None);
        assert_eq!(store.len(), 2);

        // "a" was re-inserted after "b", so "b" is now the oldest
        assert_eq!(put(&mut store, "c"), Some("b".to_string()));
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut store = CacheStore::new(0, 1800);
        assert_eq!(put(&mut store, "a"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(1, 1800);

        put(&mut store, "a");
        store.get("a");
        store.get("nope");
        put(&mut store, "b");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.stores, 2);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new(100, 1);

        put(&mut store, "a");
        put(&mut store, "b");

        sleep(Duration::from_millis(1100));
        put(&mut store, "c");

        let removed = store.cleanup_expired();
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert!(store.get("c").is_some());
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::new(100, 1800);

        put(&mut store, "a");
        put(&mut store, "b");

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert!(store.get("a").is_none());

        // Eviction bookkeeping starts over after a clear
        let mut store = CacheStore::new(1, 1800);
        put(&mut store, "a");
        store.clear();
        assert_eq!(put(&mut store, "b"), None);
    }
}
