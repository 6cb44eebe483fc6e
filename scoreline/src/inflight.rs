use crate::domain::CacheKey;
use dashmap::DashMap;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

type Slot = Arc<OnceCell<Option<Value>>>;

/// Registry of resolutions currently talking to upstream, keyed by cache key.
///
/// The first caller for a key runs the work; callers arriving while it is
/// running wait for and share its outcome. If the running caller is dropped
/// mid-flight, one of the waiters takes over.
#[derive(Default)]
pub struct InflightRegistry {
    calls: DashMap<CacheKey, Slot>,
}

impl InflightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run<F, Fut>(&self, key: &CacheKey, work: F) -> Option<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<Value>>,
    {
        let slot = self
            .calls
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();
        let guard = SlotGuard {
            calls: &self.calls,
            key,
            slot,
        };

        let outcome = guard.slot.get_or_init(work).await.clone();

        self.calls
            .remove_if(key, |_, current| Arc::ptr_eq(current, &guard.slot));
        outcome
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// Clears a slot left uninitialized when its last holder is dropped mid-flight
struct SlotGuard<'a> {
    calls: &'a DashMap<CacheKey, Slot>,
    key: &'a CacheKey,
    slot: Slot,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        // one reference in the map, one here; anything more is a waiter
        self.calls.remove_if(self.key, |_, current| {
            Arc::ptr_eq(current, &self.slot)
                && !current.initialized()
                && Arc::strong_count(current) <= 2
        });
    }
}

impl std::fmt::Debug for InflightRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InflightRegistry")
            .field("in_flight", &self.calls.len())
            .finish()
    }
}
