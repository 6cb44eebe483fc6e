pub mod domain;
pub mod inflight;
pub mod models;
pub mod normalize;
pub mod policy;
pub mod ports;
pub mod relay;
pub mod resolvers;
pub mod wire;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::{CacheEntry, CacheKey, GetResponse, League, Resource};
pub use policy::{Endpoints, HeaderProfile, ResourcePolicy};
pub use ports::{CacheStore, UpstreamFetcher};
pub use relay::{ImageRelay, RelayedImage};
pub use resolvers::Resolvers;
