//! Resource resolvers: cache lookup, upstream fetch, normalization, write-back.
//!
//! Every resolver follows the same skeleton in [`Resolvers::resolve`]. Failures
//! anywhere after the cache lookup produce the resource's empty value and are
//! never written to the cache.

mod football;
mod nfl;

pub use nfl::NFL_TEAM_IDS;

use crate::domain::{CacheKey, Resource, UpstreamRequest};
use crate::inflight::InflightRegistry;
use crate::policy::Endpoints;
use crate::ports::{CacheStore, UpstreamFetcher};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::config::UpstreamConfig;
use shared::{Error, Result};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct Resolvers {
    store: Arc<dyn CacheStore<CacheKey, Value>>,
    fetcher: Arc<dyn UpstreamFetcher>,
    endpoints: Arc<Endpoints>,
    inflight: Option<Arc<InflightRegistry>>,
}

impl Resolvers {
    pub fn new(
        store: Arc<dyn CacheStore<CacheKey, Value>>,
        fetcher: Arc<dyn UpstreamFetcher>,
        upstream: UpstreamConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            endpoints: Arc::new(Endpoints::new(upstream)),
            inflight: None,
        }
    }

    /// Concurrent misses on the same key share a single upstream resolution
    pub fn with_coalescing(mut self) -> Self {
        self.inflight = Some(Arc::new(InflightRegistry::new()));
        self
    }

    pub fn store(&self) -> &Arc<dyn CacheStore<CacheKey, Value>> {
        &self.store
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub(crate) async fn resolve<T, F, Fut>(&self, resource: Resource, key: CacheKey, compute: F) -> T
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(cached) = self.lookup(&key).await {
            return cached;
        }

        let fresh = match &self.inflight {
            Some(inflight) => {
                inflight
                    .run(&key, || self.fetch_and_store(resource, &key, compute()))
                    .await
            }
            None => self.fetch_and_store(resource, &key, compute()).await,
        };

        fresh
            .and_then(|value| match serde_json::from_value(value) {
                Ok(shaped) => Some(shaped),
                Err(e) => {
                    warn!(%key, error = %e, "freshly resolved payload did not decode");
                    None
                }
            })
            .unwrap_or_default()
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        match self.store.get(key).await {
            Ok(hit) => match serde_json::from_value(hit.value) {
                Ok(value) => {
                    debug!(%key, expires_in = ?hit.expires_in, "cache hit");
                    Some(value)
                }
                Err(e) => {
                    warn!(%key, error = %e, "cached payload no longer decodes, refetching");
                    None
                }
            },
            Err(Error::NotFound) => {
                debug!(%key, "cache miss");
                None
            }
            Err(e) => {
                warn!(%key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    async fn fetch_and_store<T, Fut>(
        &self,
        resource: Resource,
        key: &CacheKey,
        compute: Fut,
    ) -> Option<Value>
    where
        T: Serialize,
        Fut: Future<Output = Result<T>>,
    {
        let shaped = match compute.await {
            Ok(shaped) => shaped,
            Err(e) => {
                warn!(%key, resource = resource.name(), error = %e, "resolution failed, serving empty result");
                return None;
            }
        };

        let value = match serde_json::to_value(&shaped) {
            Ok(value) => value,
            Err(e) => {
                warn!(%key, error = %e, "normalized payload did not serialize");
                return None;
            }
        };

        let ttl = resource.ttl();
        match self.store.put(key.clone(), value.clone(), ttl).await {
            Ok(()) => debug!(%key, ttl_secs = ttl.0, "cached"),
            Err(e) => warn!(%key, error = %e, "cache write failed, dropping it"),
        }
        Some(value)
    }

    /// One upstream JSON call with the resource's header profile and the configured timeout
    async fn fetch(&self, resource: Resource, url: String) -> Result<Value> {
        let request = UpstreamRequest::new(
            url,
            resource.policy().profile,
            self.endpoints.timeout(),
        );
        self.fetcher.fetch_json(&request).await
    }
}

impl std::fmt::Debug for Resolvers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolvers")
            .field("store", &self.store.backend_name())
            .field("endpoints", &self.endpoints)
            .field("coalescing", &self.inflight.is_some())
            .finish()
    }
}
