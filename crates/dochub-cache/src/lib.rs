//! Cache layer for DocHub.
//!
//! Memoizes expensive derived results (search result sets, the table of
//! contents) between requests. Entries carry a time-to-live and can
//! optionally be bound to a source file: when the file's modification time
//! changes, the entry is treated as stale and dropped on the next read.
//!
//! Two implementations of the object-safe [`Cache`] trait are provided:
//!
//! - [`MemoryCache`]: bounded in-memory store with TTL expiry, mtime
//!   staleness checks, and oldest-first size eviction
//! - [`NullCache`]: no-op implementation (always miss) for disabled caching
//!
//! Values are opaque bytes; [`CacheExt`] layers typed JSON access on top.
//! A cached entry's presence in the store is the hit test, so a cached
//! `null`/empty value is a hit, not a miss.
//!
//! # Example
//!
//! ```
//! use dochub_cache::{Cache, CacheConfig, MemoryCache};
//!
//! let cache = MemoryCache::new(CacheConfig::default());
//! cache.set("toc:full", b"[]".to_vec(), None, None);
//! assert_eq!(cache.get("toc:full", None), Some(b"[]".to_vec()));
//! ```

mod ext;
mod memory;

pub use ext::CacheExt;
pub use memory::{CacheConfig, MemoryCache};

use std::path::Path;
use std::time::Duration;

/// Generic key-value cache with per-entry TTL and optional file binding.
///
/// All operations are infallible: invalidating an absent key, evicting from
/// an empty cache, and reading an expired entry are normal, silent outcomes.
/// Implementations must be safe to share across request-handling threads.
pub trait Cache: Send + Sync {
    /// Retrieve a cached value.
    ///
    /// Returns `None` when the key is absent, the entry's TTL has elapsed,
    /// or `file_path` is given and the file's current modification time
    /// differs from the snapshot taken at store time. Entries stored without
    /// a file binding are never considered stale.
    fn get(&self, key: &str, file_path: Option<&Path>) -> Option<Vec<u8>>;

    /// Store a value.
    ///
    /// `ttl` of `None` uses the configured default. When `file_path` is
    /// given, the file's current modification time is snapshotted for later
    /// staleness checks (a missing file snapshots as "absent", which still
    /// participates in the comparison). Overwriting an existing key replaces
    /// the entry.
    fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>, file_path: Option<&Path>);

    /// Remove one entry if present.
    fn invalidate(&self, key: &str);

    /// Remove every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    fn invalidate_prefix(&self, prefix: &str) -> usize;

    /// Remove all entries.
    fn clear(&self);
}

/// No-op [`Cache`] that never stores or retrieves data.
///
/// Every `get` returns `None`; every `set` is silently discarded.
/// Use when caching is disabled.
pub struct NullCache;

impl Cache for NullCache {
    fn get(&self, _key: &str, _file_path: Option<&Path>) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Option<Duration>, _file_path: Option<&Path>) {
    }

    fn invalidate(&self, _key: &str) {}

    fn invalidate_prefix(&self, _prefix: &str) -> usize {
        0
    }

    fn clear(&self) {}
}
