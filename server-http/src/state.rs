use scoreline::domain::CacheKey;
use scoreline::ports::{CacheStore, UpstreamFetcher};
use scoreline::{ImageRelay, Resolvers};
use serde_json::Value;
use shared::config::Config;
use std::sync::Arc;
use tracing::info;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub resolvers: Resolvers,
    pub image_relay: ImageRelay,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CacheStore<CacheKey, Value>>,
        fetcher: Arc<dyn UpstreamFetcher>,
        config: &Config,
    ) -> Self {
        let image_relay = ImageRelay::new(fetcher.clone(), config.upstream.timeout);
        let mut resolvers = Resolvers::new(store, fetcher, config.upstream.clone());
        if config.coalesce_inflight {
            info!("in-flight request coalescing enabled");
            resolvers = resolvers.with_coalescing();
        }

        Self {
            resolvers,
            image_relay,
        }
    }

    pub fn cache(&self) -> &Arc<dyn CacheStore<CacheKey, Value>> {
        self.resolvers.store()
    }
}
