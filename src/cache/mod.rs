//! In-memory request cache for API reads
//!
//! Memoizes responses per key with a time-to-live, coalesces concurrent
//! requests for the same key into one, and suppresses bursts of refreshes.

pub mod client;
pub mod key;
pub mod request;

use std::time::Duration;

/// Freshness and burst limits for one kind of cached read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// How long a stored value is served without refetching
    pub ttl: Duration,
    /// Minimum spacing between fetches of the same key
    pub debounce: Duration,
}

impl CachePolicy {
    // Today's logs change with every write
    pub const TODAY: CachePolicy = CachePolicy::new(30, 2_000); // 30 sec
    pub const STREAK: CachePolicy = CachePolicy::new(60, 2_000); // 1 min

    // Goal only changes when the user sets it
    pub const GOAL: CachePolicy = CachePolicy::new(5 * 60, 2_000); // 5 min

    pub const HISTORY: CachePolicy = CachePolicy::new(2 * 60, 2_000); // 2 min
    pub const STATS: CachePolicy = CachePolicy::new(2 * 60, 2_000); // 2 min

    const fn new(ttl_secs: u64, debounce_ms: u64) -> Self {
        Self {
            ttl: Duration::from_secs(ttl_secs),
            debounce: Duration::from_millis(debounce_ms),
        }
    }
}

// Re-export main types
pub use client::CachedWaterClient;
pub use key::CacheKey;
pub use request::RequestCache;
