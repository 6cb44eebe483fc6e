use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use scoreline::domain::{CacheEntry, GetResponse};
use scoreline::ports::CacheStore;
use shared::{Error, Result, TtlSecs};
use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Evicts each entry at its own `expires_at`
struct PerEntryExpiry;

impl<K, V> Expiry<K, CacheEntry<V>> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &K,
        entry: &CacheEntry<V>,
        created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.expires_at.saturating_duration_since(created_at))
    }

    fn expire_after_update(
        &self,
        _key: &K,
        entry: &CacheEntry<V>,
        updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.expires_at.saturating_duration_since(updated_at))
    }
}

/// Moka-based in-process cache with per-entry TTL.
/// Bounded by entry count; the least recently used entries go first.
pub struct MokaCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    cache: Cache<K, CacheEntry<V>>,
}

impl<K, V> MokaCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    pub fn new(name: &str, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .name(name)
            .max_capacity(max_entries)
            .expire_after(PerEntryExpiry)
            .build();

        Self { cache }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Flush moka's pending maintenance (evictions, expirations)
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for MokaCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    async fn get(&self, key: &K) -> Result<GetResponse<V>> {
        match self.cache.get(key).await {
            // moka sweeps lazily, so an entry can outlive its deadline briefly
            Some(entry) if !entry.is_expired() => {
                let remaining = entry.remaining();
                Ok(GetResponse::new(entry.value, Some(remaining)))
            }
            // expired entries are left for moka to evict
            _ => Err(Error::NotFound),
        }
    }

    async fn put(&self, key: K, val: V, ttl: TtlSecs) -> Result<()> {
        self.cache
            .insert(key, CacheEntry::new(val, ttl.as_duration()))
            .await;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

impl<K, V> Debug for MokaCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("entry_count", &self.cache.entry_count())
            .field("weighted_size", &self.cache.weighted_size())
            .finish()
    }
}
