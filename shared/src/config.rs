use std::time::Duration;
use tracing::warn;

/// Which cache backend the server should build at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheBackend {
    Memory { max_entries: u64 },
    Redis { url: String, token: Option<String> },
}

impl CacheBackend {
    pub fn name(&self) -> &'static str {
        match self {
            CacheBackend::Memory { .. } => "memory",
            CacheBackend::Redis { .. } => "redis",
        }
    }
}

/// Base URLs and per-call timeout for the third-party APIs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub sofascore_base_url: String,
    pub sofascore_image_base_url: String,
    pub espn_base_url: String,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            sofascore_base_url: Config::DEFAULT_SOFASCORE_BASE_URL.to_string(),
            sofascore_image_base_url: Config::DEFAULT_SOFASCORE_IMAGE_BASE_URL.to_string(),
            espn_base_url: Config::DEFAULT_ESPN_BASE_URL.to_string(),
            timeout: Duration::from_secs(Config::DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

pub struct Config {
    pub host: String,
    pub port: u16,
    pub cache: CacheBackend,
    /// Capacity of the in-memory store, also used when redis is unreachable
    pub cache_max_entries: u64,
    pub upstream: UpstreamConfig,
    pub coalesce_inflight: bool,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8000;
    const DEFAULT_MAX_ENTRIES: u64 = 10_000;
    const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_SOFASCORE_BASE_URL: &str = "https://api.sofascore.com/api/v1";
    const DEFAULT_SOFASCORE_IMAGE_BASE_URL: &str = "https://api.sofascore.app/api/v1";
    const DEFAULT_ESPN_BASE_URL: &str =
        "https://site.api.espn.com/apis/site/v2/sports/football/nfl";

    pub fn from_env() -> Self {
        let host =
            std::env::var("SCORELINE_HOST").unwrap_or_else(|_| Self::DEFAULT_HOST.to_string());
        let port = std::env::var("SCORELINE_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(Self::DEFAULT_PORT);

        let cache_max_entries = std::env::var("SCORELINE_CACHE_MAX_ENTRIES")
            .ok()
            .and_then(|n| n.parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(Self::DEFAULT_MAX_ENTRIES);

        let token = std::env::var("SCORELINE_CACHE_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let cache = match std::env::var("SCORELINE_CACHE_URL") {
            Ok(url) if !url.trim().is_empty() => CacheBackend::Redis {
                url: url.trim().to_string(),
                token,
            },
            _ => {
                if token.is_some() {
                    warn!("SCORELINE_CACHE_TOKEN set without SCORELINE_CACHE_URL, ignoring it");
                }
                CacheBackend::Memory {
                    max_entries: cache_max_entries,
                }
            }
        };

        let timeout_secs = std::env::var("SCORELINE_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(Self::DEFAULT_UPSTREAM_TIMEOUT_SECS);

        let upstream = UpstreamConfig {
            sofascore_base_url: env_url(
                "SCORELINE_SOFASCORE_BASE_URL",
                Self::DEFAULT_SOFASCORE_BASE_URL,
            ),
            sofascore_image_base_url: env_url(
                "SCORELINE_SOFASCORE_IMAGE_BASE_URL",
                Self::DEFAULT_SOFASCORE_IMAGE_BASE_URL,
            ),
            espn_base_url: env_url("SCORELINE_ESPN_BASE_URL", Self::DEFAULT_ESPN_BASE_URL),
            timeout: Duration::from_secs(timeout_secs),
        };

        let coalesce_inflight = std::env::var("SCORELINE_COALESCE_INFLIGHT")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            host,
            port,
            cache,
            cache_max_entries,
            upstream,
            coalesce_inflight,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_url(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}
