use super::{MediaMatch, MetadataLookup, Result};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached titles
    pub max_entries: u64,
    /// TTL for a cached match
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 2000,
            ttl: Duration::from_secs(21600), // 6 hours
        }
    }
}

/// Memoizes successful lookups by title.
///
/// Misses and failures are not cached, so a title that timed out once is
/// asked for again on the next request.
pub struct CachedLookup {
    inner: Arc<dyn MetadataLookup>,
    cache: Cache<String, Arc<MediaMatch>>,
}

impl CachedLookup {
    pub fn new(inner: Arc<dyn MetadataLookup>) -> Self {
        Self::with_config(inner, CacheConfig::default())
    }

    pub fn with_config(inner: Arc<dyn MetadataLookup>, config: CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();

        Self { inner, cache }
    }

    fn key(title: &str) -> String {
        title.trim().to_lowercase()
    }
}

#[async_trait]
impl MetadataLookup for CachedLookup {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    async fn lookup(&self, title: &str) -> Result<Option<MediaMatch>> {
        let key = Self::key(title);

        if let Some(hit) = self.cache.get(&key).await {
            tracing::trace!(title, "Metadata cache hit");
            return Ok(Some((*hit).clone()));
        }

        let found = self.inner.lookup(title).await?;
        if let Some(ref found) = found {
            self.cache.insert(key, Arc::new(found.clone())).await;
        }

        Ok(found)
    }
}
