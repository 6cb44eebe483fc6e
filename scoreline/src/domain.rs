use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

pub mod request {
    use crate::policy::HeaderProfile;
    use std::time::Duration;

    /// A single outbound GET. The timeout is not optional.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct UpstreamRequest {
        pub url: String,
        pub profile: HeaderProfile,
        pub timeout: Duration,
        /// Largest body the caller will accept, in bytes
        pub max_body: Option<usize>,
    }

    impl UpstreamRequest {
        pub fn new(url: impl Into<String>, profile: HeaderProfile, timeout: Duration) -> Self {
            Self {
                url: url.into(),
                profile,
                timeout,
                max_body: None,
            }
        }

        pub fn with_max_body(mut self, limit: usize) -> Self {
            self.max_body = Some(limit);
            self
        }
    }
}

pub mod response {
    use bytes::Bytes;
    use std::time::Duration;

    #[derive(Clone, Debug)]
    pub struct GetResponse<V> {
        pub value: V,
        /// Remaining lifetime when the backend can tell us
        pub expires_in: Option<Duration>,
    }

    impl<V> GetResponse<V> {
        pub fn new(value: V, expires_in: Option<Duration>) -> Self {
            Self { value, expires_in }
        }
    }

    /// Raw body of a successful binary fetch
    #[derive(Clone, Debug)]
    pub struct FetchedBytes {
        pub bytes: Bytes,
        pub content_type: Option<String>,
    }
}

pub use request::UpstreamRequest;
pub use response::{FetchedBytes, GetResponse};

/// A stored payload plus the instant it stops being servable
#[derive(Clone, Debug)]
pub struct CacheEntry<V> {
    pub value: V,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn with_expiry(value: V, expires_at: Instant) -> Self {
        Self { value, expires_at }
    }

    /// An entry is dead from `expires_at` onwards, inclusive
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

/// Cache key derived from a resource and its normalized parameters.
///
/// Parameters are escaped so that no two distinct parameter lists can
/// render to the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_resource(resource: Resource, params: &[&str]) -> Self {
        let mut key = resource.name().to_string();
        for param in params {
            key.push(':');
            key.push_str(&escape_param(&param.trim().to_ascii_lowercase()));
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn escape_param(param: &str) -> String {
    param.replace('%', "%25").replace(':', "%3A")
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Every logical resource the proxy serves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    LiveScores,
    Teams,
    Players,
    Standings,
    Squad,
    NflRoster,
    NflScores,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::LiveScores,
        Resource::Teams,
        Resource::Players,
        Resource::Standings,
        Resource::Squad,
        Resource::NflRoster,
        Resource::NflScores,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::LiveScores => "football:live",
            Resource::Teams => "football:teams",
            Resource::Players => "football:players",
            Resource::Standings => "football:standings",
            Resource::Squad => "football:squad",
            Resource::NflRoster => "nfl:players",
            Resource::NflScores => "nfl:scores",
        }
    }
}

/// Supported football competitions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    #[default]
    Epl,
    Laliga,
    Seriea,
    Bundesliga,
    Ligue1,
}

impl League {
    pub fn code(&self) -> &'static str {
        match self {
            League::Epl => "epl",
            League::Laliga => "laliga",
            League::Seriea => "seriea",
            League::Bundesliga => "bundesliga",
            League::Ligue1 => "ligue1",
        }
    }

    /// SofaScore unique-tournament id
    pub fn tournament_id(&self) -> u32 {
        match self {
            League::Epl => 17,
            League::Laliga => 8,
            League::Seriea => 23,
            League::Bundesliga => 35,
            League::Ligue1 => 34,
        }
    }
}
