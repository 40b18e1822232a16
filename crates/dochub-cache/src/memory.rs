//! Bounded in-memory cache implementation.
//!
//! [`MemoryCache`] keeps entries in a `HashMap` behind a single `Mutex`
//! together with a running byte total. An entry is dropped on read when its
//! TTL has elapsed or its bound file's modification time no longer matches
//! the snapshot taken at store time. When an insert would push the total
//! over the configured ceiling, entries are evicted oldest-first until the
//! total fits again.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime};

use crate::Cache;

/// Configuration for [`MemoryCache`].
#[derive(Clone, Copy, Debug)]
pub struct CacheConfig {
    /// TTL applied when `set` is called without an explicit TTL.
    pub default_ttl: Duration,
    /// Byte ceiling for the sum of all entry sizes.
    pub max_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(300),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// One stored entry.
struct Entry {
    value: Vec<u8>,
    cached_at: Instant,
    ttl: Duration,
    /// `Some` when a file was bound at store time; the inner option records
    /// whether that file existed.
    mtime_snapshot: Option<Option<SystemTime>>,
}

impl Entry {
    /// Estimated size contribution of this entry under `key`.
    fn size(&self, key: &str) -> usize {
        key.len() + self.value.len()
    }

    fn expired(&self) -> bool {
        self.ttl.is_zero() || self.cached_at.elapsed() > self.ttl
    }
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    total_bytes: usize,
}

impl Inner {
    fn remove(&mut self, key: &str) -> Option<Entry> {
        let entry = self.entries.remove(key)?;
        self.total_bytes = self.total_bytes.saturating_sub(entry.size(key));
        Some(entry)
    }

    /// Evict oldest-`cached_at`-first until `incoming` extra bytes fit under
    /// `max_bytes`. A no-op once the map is empty.
    fn evict_for(&mut self, incoming: usize, max_bytes: usize) {
        while self.total_bytes + incoming > max_bytes && !self.entries.is_empty() {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.cached_at)
                .map(|(key, _)| key.clone());
            let Some(key) = oldest else {
                break;
            };
            tracing::debug!(key, "evicting cache entry to stay under size ceiling");
            self.remove(&key);
        }
    }
}

/// Bounded in-memory [`Cache`].
///
/// A single mutex guards the entry map and the size counter; all operations
/// are short and non-blocking, so no finer-grained locking is needed.
pub struct MemoryCache {
    config: CacheConfig,
    inner: Mutex<Inner>,
}

impl MemoryCache {
    /// Create a cache with the given configuration.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Number of live entries (expired entries still count until read).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// True when no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another thread panicked mid-operation;
        // the map itself is still structurally sound.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str, file_path: Option<&Path>) -> Option<Vec<u8>> {
        let mut inner = self.lock();

        let (expired, stale) = {
            let entry = inner.entries.get(key)?;
            let expired = entry.expired();
            let stale = !expired
                && matches!(
                    (file_path, entry.mtime_snapshot),
                    (Some(path), Some(snapshot)) if file_mtime(path) != snapshot
                );
            (expired, stale)
        };

        if expired || stale {
            tracing::debug!(key, expired, stale, "dropping invalid cache entry");
            inner.remove(key);
            return None;
        }

        inner.entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>, file_path: Option<&Path>) {
        let entry = Entry {
            value,
            cached_at: Instant::now(),
            ttl: ttl.unwrap_or(self.config.default_ttl),
            mtime_snapshot: file_path.map(file_mtime),
        };
        let incoming = entry.size(key);

        let mut inner = self.lock();
        inner.remove(key);
        inner.evict_for(incoming, self.config.max_bytes);
        inner.total_bytes += incoming;
        inner.entries.insert(key.to_owned(), entry);
    }

    fn invalidate(&self, key: &str) {
        self.lock().remove(key);
    }

    fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut inner = self.lock();
        let keys: Vec<String> = inner
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        for key in &keys {
            inner.remove(key);
        }
        keys.len()
    }

    fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.total_bytes = 0;
    }
}

/// Current modification time of a file, `None` when it cannot be read.
fn file_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::thread;

    use super::*;
    use crate::CacheExt;

    static_assertions::assert_impl_all!(MemoryCache: Send, Sync);

    fn make_cache() -> MemoryCache {
        MemoryCache::new(CacheConfig::default())
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let cache = make_cache();

        cache.set("key", b"value".to_vec(), None, None);

        assert_eq!(cache.get("key", None), Some(b"value".to_vec()));
    }

    #[test]
    fn test_get_absent_key_misses() {
        let cache = make_cache();

        assert_eq!(cache.get("missing", None), None);
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = make_cache();

        cache.set("key", b"v".to_vec(), Some(Duration::from_millis(30)), None);
        assert_eq!(cache.get("key", None), Some(b"v".to_vec()));

        thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.get("key", None), None);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let cache = make_cache();

        cache.set("key", b"v".to_vec(), Some(Duration::ZERO), None);

        assert_eq!(cache.get("key", None), None);
    }

    #[test]
    fn test_expired_entry_is_removed_on_read() {
        let cache = make_cache();

        cache.set("key", b"v".to_vec(), Some(Duration::ZERO), None);
        assert_eq!(cache.get("key", None), None);

        assert!(cache.is_empty());
    }

    #[test]
    fn test_mtime_change_invalidates() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("doc.md");
        fs::write(&file, "original").unwrap();

        let cache = make_cache();
        cache.set("key", b"derived".to_vec(), None, Some(&file));
        assert_eq!(cache.get("key", Some(&file)), Some(b"derived".to_vec()));

        // Small delay so the rewrite lands on a different mtime
        thread::sleep(Duration::from_millis(10));
        fs::write(&file, "changed").unwrap();

        assert_eq!(cache.get("key", Some(&file)), None);
    }

    #[test]
    fn test_missing_file_snapshot_stale_once_created() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("later.md");

        let cache = make_cache();
        cache.set("key", b"v".to_vec(), None, Some(&file));
        assert_eq!(cache.get("key", Some(&file)), Some(b"v".to_vec()));

        fs::write(&file, "now exists").unwrap();
        assert_eq!(cache.get("key", Some(&file)), None);
    }

    #[test]
    fn test_unbound_entry_never_stale() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("doc.md");
        fs::write(&file, "data").unwrap();

        let cache = make_cache();
        cache.set("key", b"v".to_vec(), None, None);

        // Passing a path on get is irrelevant without a stored snapshot
        assert_eq!(cache.get("key", Some(&file)), Some(b"v".to_vec()));
    }

    #[test]
    fn test_invalidate_absent_key_is_silent() {
        let cache = make_cache();

        cache.invalidate("never-set");
    }

    #[test]
    fn test_invalidate_prefix_counts_removed() {
        let cache = make_cache();
        cache.set("search:a", b"1".to_vec(), None, None);
        cache.set("search:b", b"2".to_vec(), None, None);
        cache.set("toc:full", b"3".to_vec(), None, None);

        assert_eq!(cache.invalidate_prefix("search:"), 2);
        assert_eq!(cache.get("search:a", None), None);
        assert_eq!(cache.get("toc:full", None), Some(b"3".to_vec()));
    }

    #[test]
    fn test_clear_resets_everything() {
        let cache = make_cache();
        cache.set("a", b"1".to_vec(), None, None);
        cache.set("b", b"2".to_vec(), None, None);

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a", None), None);
    }

    #[test]
    fn test_eviction_drops_oldest_entry() {
        let cache = MemoryCache::new(CacheConfig {
            default_ttl: Duration::from_secs(60),
            max_bytes: 40,
        });

        // Entry size is key length + value length (13 bytes each here)
        cache.set("old", b"0123456789".to_vec(), None, None);
        thread::sleep(Duration::from_millis(5));
        cache.set("mid", b"0123456789".to_vec(), None, None);
        thread::sleep(Duration::from_millis(5));
        cache.set("new", b"0123456789".to_vec(), None, None);
        thread::sleep(Duration::from_millis(5));

        // 4th entry pushes the total past 40 bytes; "old" must go
        cache.set("top", b"0123456789".to_vec(), None, None);

        assert_eq!(cache.get("old", None), None);
        assert_eq!(cache.get("top", None), Some(b"0123456789".to_vec()));
    }

    #[test]
    fn test_oversized_entry_evicts_all_but_still_inserts() {
        let cache = MemoryCache::new(CacheConfig {
            default_ttl: Duration::from_secs(60),
            max_bytes: 16,
        });
        cache.set("a", b"12345".to_vec(), None, None);

        cache.set("big", vec![0u8; 64], None, None);

        assert_eq!(cache.get("a", None), None);
        assert_eq!(cache.get("big", None), Some(vec![0u8; 64]));
    }

    #[test]
    fn test_overwrite_replaces_size_accounting() {
        let cache = MemoryCache::new(CacheConfig {
            default_ttl: Duration::from_secs(60),
            max_bytes: 64,
        });

        // Repeated overwrites of one key must not accumulate toward the
        // ceiling and evict unrelated entries.
        cache.set("stable", b"keep me".to_vec(), None, None);
        for _ in 0..10 {
            cache.set("hot", vec![1u8; 20], None, None);
        }

        assert_eq!(cache.get("stable", None), Some(b"keep me".to_vec()));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cached_json_null_is_a_hit() {
        let cache = make_cache();

        cache.set_json("maybe", &Option::<String>::None, None, None);

        let value: Option<Option<String>> = cache.get_json("maybe", None);
        assert_eq!(value, Some(None));
    }

    #[test]
    fn test_concurrent_access() {
        let cache = std::sync::Arc::new(make_cache());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = std::sync::Arc::clone(&cache);
                thread::spawn(move || {
                    let key = format!("key-{i}");
                    for _ in 0..50 {
                        cache.set(&key, vec![0u8; 16], None, None);
                        let _ = cache.get(&key, None);
                        cache.invalidate(&key);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
