//! In-crate fakes for the cache and upstream ports.

use crate::domain::{CacheEntry, CacheKey, FetchedBytes, GetResponse, UpstreamRequest};
use crate::policy::HeaderProfile;
use crate::ports::{CacheStore, UpstreamFetcher};
use async_trait::async_trait;
use serde_json::Value;
use shared::{Error, Result, TtlSecs};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Map-backed store that remembers every TTL it was handed
#[derive(Default)]
pub struct RecordingStore {
    entries: Mutex<HashMap<CacheKey, CacheEntry<Value>>>,
    puts: Mutex<Vec<(CacheKey, TtlSecs)>>,
    unavailable: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: &CacheKey, value: Value, expires_at: Instant) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.clone(), CacheEntry::with_expiry(value, expires_at));
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn stored(&self, key: &CacheKey) -> Option<Value> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|entry| entry.value.clone())
    }

    pub fn recorded_ttl(&self, key: &CacheKey) -> Option<TtlSecs> {
        self.puts
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, ttl)| *ttl)
    }

    pub fn put_count(&self) -> usize {
        self.puts.lock().unwrap().len()
    }
}

#[async_trait]
impl CacheStore<CacheKey, Value> for RecordingStore {
    async fn get(&self, key: &CacheKey) -> Result<GetResponse<Value>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Backend("connection refused".to_string()));
        }
        let entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => Ok(GetResponse::new(
                entry.value.clone(),
                Some(entry.remaining()),
            )),
            _ => Err(Error::NotFound),
        }
    }

    async fn put(&self, key: CacheKey, val: Value, ttl: TtlSecs) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Backend("connection refused".to_string()));
        }
        self.puts.lock().unwrap().push((key.clone(), ttl));
        self.entries
            .lock()
            .unwrap()
            .insert(key, CacheEntry::new(val, ttl.as_duration()));
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Backend("connection refused".to_string()));
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

enum Scripted {
    Json(Value),
    Bytes(FetchedBytes),
    Fail,
}

/// Fetcher answering from a URL → response script. Unscripted URLs fail.
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: HashMap<String, Scripted>,
    calls: Mutex<Vec<UpstreamRequest>>,
    delay: Option<Duration>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: impl Into<String>, body: Value) -> Self {
        self.routes.insert(url.into(), Scripted::Json(body));
        self
    }

    pub fn with_bytes(mut self, url: impl Into<String>, body: FetchedBytes) -> Self {
        self.routes.insert(url.into(), Scripted::Bytes(body));
        self
    }

    pub fn with_failure(mut self, url: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Scripted::Fail);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.url == url)
            .count()
    }

    pub fn last_profile(&self) -> Option<HeaderProfile> {
        self.calls.lock().unwrap().last().map(|r| r.profile)
    }

    pub fn last_timeout(&self) -> Option<Duration> {
        self.calls.lock().unwrap().last().map(|r| r.timeout)
    }

    pub fn last_max_body(&self) -> Option<usize> {
        self.calls.lock().unwrap().last().and_then(|r| r.max_body)
    }

    async fn record(&self, request: &UpstreamRequest) {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl UpstreamFetcher for ScriptedFetcher {
    async fn fetch_json(&self, request: &UpstreamRequest) -> Result<Value> {
        self.record(request).await;
        match self.routes.get(&request.url) {
            Some(Scripted::Json(body)) => Ok(body.clone()),
            Some(Scripted::Bytes(_)) => Err(Error::Decode("not json".to_string())),
            Some(Scripted::Fail) => Err(Error::UpstreamStatus {
                url: request.url.clone(),
                status: 503,
            }),
            None => Err(Error::Upstream(format!("no route for {}", request.url))),
        }
    }

    async fn fetch_bytes(&self, request: &UpstreamRequest) -> Result<FetchedBytes> {
        self.record(request).await;
        match self.routes.get(&request.url) {
            Some(Scripted::Bytes(body)) => Ok(body.clone()),
            Some(Scripted::Json(body)) => Ok(FetchedBytes {
                bytes: body.to_string().into_bytes().into(),
                content_type: Some("application/json".to_string()),
            }),
            Some(Scripted::Fail) => Err(Error::UpstreamStatus {
                url: request.url.clone(),
                status: 503,
            }),
            None => Err(Error::Upstream(format!("no route for {}", request.url))),
        }
    }
}
