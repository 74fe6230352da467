//! Caching layer for search results.
//!
//! Results depend only on the resolved endpoints, the sort key and the
//! schedule. Keys are therefore `(origin, destination, sort)`, and every
//! schedule write clears the whole cache.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Itinerary, StationId};
use crate::planner::SortBy;

/// Cache key for searches: (origin, destination, sort key).
pub type SearchKey = (StationId, StationId, SortBy);

/// Cached ranked itineraries.
pub type SearchEntry = Arc<Vec<Itinerary>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Cache for ranked search results.
pub struct SearchCache {
    searches: MokaCache<SearchKey, SearchEntry>,
}

impl SearchCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let searches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { searches }
    }

    /// Get a cached result.
    pub async fn get(&self, key: &SearchKey) -> Option<SearchEntry> {
        self.searches.get(key).await
    }

    /// Insert a result into the cache.
    pub async fn insert(&self, key: SearchKey, entry: SearchEntry) {
        self.searches.insert(key, entry).await;
    }

    /// Drop a single entry.
    pub async fn invalidate(&self, key: &SearchKey) {
        self.searches.invalidate(key).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.searches.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.searches.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(from: i64, to: i64, sort_by: SortBy) -> SearchKey {
        (StationId(from), StationId(to), sort_by)
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 1000);
    }

    #[test]
    fn cache_creation() {
        let cache = SearchCache::new(&CacheConfig::default());
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn insert_then_get() {
        let cache = SearchCache::new(&CacheConfig::default());
        cache.insert(key(1, 2, SortBy::Price), Arc::new(Vec::new())).await;

        assert!(cache.get(&key(1, 2, SortBy::Price)).await.is_some());
        // Sort key and direction are part of the key
        assert!(cache.get(&key(1, 2, SortBy::Duration)).await.is_none());
        assert!(cache.get(&key(2, 1, SortBy::Price)).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_all_clears() {
        let cache = SearchCache::new(&CacheConfig::default());
        cache.insert(key(1, 2, SortBy::Price), Arc::new(Vec::new())).await;
        cache.invalidate_all();

        assert!(cache.get(&key(1, 2, SortBy::Price)).await.is_none());
    }
}
