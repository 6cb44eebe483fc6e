use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, IntoConnectionInfo};
use scoreline::domain::GetResponse;
use scoreline::ports::CacheStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{Error, Result, TtlSecs};
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, info};

/// Upper bound on any single round-trip to the server
const OP_TIMEOUT: Duration = Duration::from_secs(2);

/// Networked cache over a Redis-compatible server.
///
/// Values are stored as JSON strings under `SET .. EX`, so expiry is
/// enforced by the server itself.
pub struct RedisCache<K, V> {
    conn_manager: ConnectionManager,
    redis_url: String,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K, V> RedisCache<K, V> {
    /// Connects eagerly; `token`, when set, replaces any password in `url`
    pub async fn connect(url: &str, token: Option<&str>) -> Result<Self> {
        let mut info = url
            .into_connection_info()
            .map_err(|e| Error::Backend(format!("invalid cache url: {e}")))?;
        if let Some(token) = token {
            info.redis.password = Some(token.to_string());
        }

        let client = redis::Client::open(info).map_err(backend)?;
        let conn_manager = bounded(ConnectionManager::new(client)).await?;
        info!(url = %redact(url), "connected to redis cache");

        Ok(Self {
            conn_manager,
            redis_url: redact(url),
            _marker: PhantomData,
        })
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for RedisCache<K, V>
where
    K: AsRef<str> + Send + Sync + 'static,
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<GetResponse<V>> {
        let key: &str = key.as_ref();
        let mut conn = self.conn_manager.clone();
        let (raw, ttl): (Option<String>, i64) = bounded(
            redis::pipe()
                .get(key)
                .ttl(key)
                .query_async::<_, (Option<String>, i64)>(&mut conn),
        )
        .await?;

        let Some(raw) = raw else {
            debug!(key, "redis miss");
            return Err(Error::NotFound);
        };
        let value = serde_json::from_str(&raw)
            .map_err(|e| Error::Decode(format!("cached value under {key}: {e}")))?;
        let expires_in = u64::try_from(ttl).ok().map(Duration::from_secs);
        Ok(GetResponse::new(value, expires_in))
    }

    async fn put(&self, key: K, val: V, ttl: TtlSecs) -> Result<()> {
        // EX 0 is rejected by the server; an entry that is already dead is simply not written
        if ttl.0 == 0 {
            return Ok(());
        }
        let key: &str = key.as_ref();
        let raw = serde_json::to_string(&val).map_err(|e| Error::Decode(e.to_string()))?;
        let mut conn = self.conn_manager.clone();
        bounded(conn.set_ex::<_, _, ()>(key, raw, ttl.0)).await?;
        debug!(key, ttl_secs = ttl.0, "redis SETEX");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let pong: String = bounded(redis::cmd("PING").query_async::<_, String>(&mut conn)).await?;
        if pong.eq_ignore_ascii_case("pong") {
            Ok(())
        } else {
            Err(Error::Backend(format!("unexpected PING reply: {pong}")))
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

impl<K, V> fmt::Debug for RedisCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("redis_url", &self.redis_url)
            .field("conn_manager", &"<ConnectionManager>")
            .finish()
    }
}

async fn bounded<T, F>(op: F) -> Result<T>
where
    F: Future<Output = redis::RedisResult<T>>,
{
    match tokio::time::timeout(OP_TIMEOUT, op).await {
        Ok(result) => result.map_err(backend),
        Err(_) => Err(Error::Backend(format!(
            "redis operation timed out after {}s",
            OP_TIMEOUT.as_secs()
        ))),
    }
}

fn backend(e: redis::RedisError) -> Error {
    Error::Backend(e.to_string())
}

/// Strips credentials before a url reaches the logs
fn redact(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => match rest.rsplit_once('@') {
            Some((_, host)) => format!("{scheme}://***@{host}"),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}
