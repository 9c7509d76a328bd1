//! Caching layer for research data to avoid re-fetching upstream sources

use cached::{Cached, TimedCache};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key for research data requests
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Stock symbol
    pub symbol: String,
    /// Report section or endpoint name
    pub section: String,
    /// Additional parameters as JSON string
    pub params: String,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(
        symbol: impl Into<String>,
        section: impl Into<String>,
        params: impl Serialize,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            section: section.into(),
            params: serde_json::to_string(&params).unwrap_or_default(),
        }
    }
}

/// Thread-safe TTL cache over JSON payloads
pub struct SectionCache {
    cache: Arc<RwLock<TimedCache<CacheKey, serde_json::Value>>>,
}

impl SectionCache {
    /// Create a new cache with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a value from the cache
    pub async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a value into the cache
    pub async fn insert(&self, key: CacheKey, value: serde_json::Value) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Get a cached value or fetch and cache it.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: CacheKey,
        fetcher: F,
    ) -> Result<serde_json::Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<serde_json::Value, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!(?key, "cache hit");
            return Ok(value);
        }

        tracing::debug!(?key, "cache miss");
        let value = fetcher().await?;
        self.insert(key, value.clone()).await;

        Ok(value)
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Whether the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for SectionCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

/// Per-section caches with independent TTLs
pub struct CacheManager {
    /// Historical price series
    pub history: SectionCache,
    /// Fundamental data
    pub fundamental: SectionCache,
    /// Scraped news
    pub news: SectionCache,
}

impl CacheManager {
    /// Create a cache manager with the given TTLs
    pub fn new(history_ttl: Duration, fundamental_ttl: Duration, news_ttl: Duration) -> Self {
        Self {
            history: SectionCache::new(history_ttl),
            fundamental: SectionCache::new(fundamental_ttl),
            news: SectionCache::new(news_ttl),
        }
    }

    /// Create a cache manager from the pipeline configuration
    pub fn from_config(config: &crate::config::ResearchConfig) -> Self {
        Self::new(
            config.cache_ttl_history,
            config.cache_ttl_fundamental,
            config.cache_ttl_news,
        )
    }

    /// Clear all caches
    pub async fn clear_all(&self) {
        self.history.clear().await;
        self.fundamental.clear().await;
        self.news.clear().await;
    }
}
