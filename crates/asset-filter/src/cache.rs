//! Content-addressed filter cache using moka
//!
//! Where [`crate::MemoFilter`] remembers one result per call site,
//! [`FilterCache`] is shared: any view holding an equal collection (same
//! [`ContentHash`]) and an equivalent query gets the same `Arc` back.

use std::sync::Arc;
use std::time::Duration;

use asset_model::{ContentAddressed, ContentHash, FilterQuery};
use moka::sync::Cache;

use crate::filter::{filter_items, Searchable};

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Shared cache of filter results keyed by collection content and folded query
#[derive(Clone)]
pub struct FilterCache<T> {
    inner: Cache<(ContentHash, String), Arc<[T]>>,
}

impl<T> std::fmt::Debug for FilterCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterCache").finish_non_exhaustive()
    }
}

impl<T> FilterCache<T>
where
    T: Searchable + ContentAddressed + Clone + Send + Sync + 'static,
{
    /// Create cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create cache with time-based expiration
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Filter `items`, sharing results across equal collections
    ///
    /// Queries differing only in case share an entry. The identity query
    /// bypasses the cache and returns `items` itself.
    pub fn filter(&self, items: &Arc<[T]>, query: &FilterQuery) -> Arc<[T]> {
        if query.is_identity() {
            return Arc::clone(items);
        }
        let hash = ContentHash::of_items(items);
        self.inner.get_with((hash, query.needle().to_string()), || {
            tracing::trace!(
                collection = %hash.short(),
                query = query.raw(),
                input = items.len(),
                "filter cache miss"
            );
            filter_items(items, query).into_owned().into()
        })
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }
}

impl<T> Default for FilterCache<T>
where
    T: Searchable + ContentAddressed + Clone + Send + Sync + 'static,
{
    /// Create cache with default capacity (1,000 entries)
    fn default() -> Self {
        Self::new(1_000)
    }
}
