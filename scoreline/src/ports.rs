#![deny(clippy::all)]

use crate::domain::{FetchedBytes, GetResponse, UpstreamRequest};
use async_trait::async_trait;
use serde_json::Value;
use shared::config::CacheBackend;
use shared::{Result, TtlSecs};
use std::sync::Arc;

// Ports are the pluggable seams between resolvers and the outside world

/// Port for building the cache store selected by configuration
#[async_trait]
pub trait StorageFactory<K, V>: Send + Sync + 'static {
    async fn create(&self, backend: &CacheBackend) -> Result<Arc<dyn CacheStore<K, V>>>;
}

/// Port for cache operations.
///
/// `get` answers `Error::NotFound` for both absent and expired entries.
/// Any other error means the backend itself misbehaved; callers treat it
/// the same way as a miss.
#[async_trait]
pub trait CacheStore<K, V>: Send + Sync + 'static {
    async fn get(&self, key: &K) -> Result<GetResponse<V>>;
    async fn put(&self, key: K, val: V, ttl: TtlSecs) -> Result<()>;
    async fn ping(&self) -> Result<()>;
    fn backend_name(&self) -> &'static str;
}

/// Port for third-party HTTP calls
#[async_trait]
pub trait UpstreamFetcher: Send + Sync + 'static {
    async fn fetch_json(&self, request: &UpstreamRequest) -> Result<Value>;
    async fn fetch_bytes(&self, request: &UpstreamRequest) -> Result<FetchedBytes>;
}
