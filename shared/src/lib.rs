// shared/src/lib.rs

use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not found")]
    NotFound,
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("upstream {url} returned status {status}")]
    UpstreamStatus { url: String, status: u16 },
    #[error("decode: {0}")]
    Decode(String),
    #[error("cache backend: {0}")]
    Backend(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Time-to-live in whole seconds, the granularity every backend agrees on
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TtlSecs(pub u64);

impl TtlSecs {
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl From<TtlSecs> for Duration {
    fn from(ttl: TtlSecs) -> Self {
        ttl.as_duration()
    }
}

pub mod config;
