//! Cache Module
//!
//! In-memory TTL caching with a capacity bound, used by the API handlers for
//! response caching and by the API client for GET responses.

mod entry;
mod lru;
mod stats;
mod store;


use std::time::Duration;

pub(crate) use entry::CacheEntry;
pub(crate) use lru::RecencyTracker;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// Lifetime of server-side response cache entries
pub const SERVER_CACHE_TTL: Duration = Duration::from_secs(60);

/// Lifetime of API client cache entries
pub const CLIENT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Capacity used when none is configured
pub const DEFAULT_MAX_ENTRIES: usize = 1000;
