//! Extension trait for [`Cache`] with typed convenience methods.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Cache;

/// Typed convenience methods for [`Cache`].
///
/// Provides `get_json`/`set_json` for serde-serializable types. These are
/// default methods on an extension trait so that:
///
/// - [`Cache`] stays object-safe with no serde dependency in its signature
/// - Implementors only need to handle raw bytes
/// - Callers get ergonomic typed access via a blanket impl
///
/// # Example
///
/// ```
/// use dochub_cache::{Cache, CacheExt, MemoryCache};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Toc { entries: Vec<String> }
///
/// let cache = MemoryCache::default();
/// cache.set_json("toc", &Toc { entries: vec!["intro".into()] }, None, None);
/// let toc: Option<Toc> = cache.get_json("toc", None);
/// assert!(toc.is_some());
/// ```
pub trait CacheExt: Cache {
    /// Retrieve a JSON-deserialized value from the cache.
    ///
    /// Returns `None` on cache miss, staleness, or deserialization failure.
    fn get_json<T: DeserializeOwned>(&self, key: &str, file_path: Option<&Path>) -> Option<T> {
        let bytes = self.get(key, file_path)?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Store a value as JSON in the cache.
    ///
    /// Silently does nothing if serialization fails.
    fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
        file_path: Option<&Path>,
    ) {
        if let Ok(bytes) = serde_json::to_vec(value) {
            self.set(key, bytes, ttl, file_path);
        }
    }
}

impl<C: Cache + ?Sized> CacheExt for C {}
