pub mod moka_cache;
pub mod redis_cache;

use async_trait::async_trait;
use moka_cache::MokaCache;
use redis_cache::RedisCache;
use scoreline::domain::CacheKey;
use scoreline::ports::{CacheStore, StorageFactory};
use serde_json::Value;
use shared::Result;
use shared::config::CacheBackend;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds whichever backend the configuration selects
#[derive(Clone, Copy, Debug, Default)]
pub struct UnifiedStorageFactory;

impl UnifiedStorageFactory {
    /// Like [`StorageFactory::create`], but a networked backend that cannot be
    /// reached at startup degrades to an in-process store instead of failing.
    pub async fn create_or_fallback(
        &self,
        backend: &CacheBackend,
        fallback_max_entries: u64,
    ) -> Arc<dyn CacheStore<CacheKey, Value>> {
        match self.create(backend).await {
            Ok(store) => store,
            Err(e) => {
                warn!(
                    backend = backend.name(),
                    error = %e,
                    "cache backend unavailable, falling back to in-memory"
                );
                Arc::new(MokaCache::<CacheKey, Value>::new(
                    "scoreline",
                    fallback_max_entries,
                ))
            }
        }
    }
}

#[async_trait]
impl StorageFactory<CacheKey, Value> for UnifiedStorageFactory {
    async fn create(&self, backend: &CacheBackend) -> Result<Arc<dyn CacheStore<CacheKey, Value>>> {
        match backend {
            CacheBackend::Memory { max_entries } => {
                info!(max_entries, "using in-memory cache");
                Ok(Arc::new(MokaCache::<CacheKey, Value>::new(
                    "scoreline",
                    *max_entries,
                )))
            }
            CacheBackend::Redis { url, token } => {
                let cache = RedisCache::<CacheKey, Value>::connect(url, token.as_deref()).await?;
                Ok(Arc::new(cache))
            }
        }
    }
}
