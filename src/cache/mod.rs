//! Cache Module
//!
//! Provides a time-bounded in-memory cache: lazy expiry on read plus a
//! periodic background sweep that bounds memory.

use async_trait::async_trait;

mod entry;
mod expiring;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use expiring::ExpiringCache;
pub use store::CacheStore;

// == Cache Trait ==
/// Read/write interface the lookup service depends on.
///
/// Lets tests substitute a fake for [`ExpiringCache`].
#[async_trait]
pub trait Cache<V>: Send + Sync {
    /// Returns the value for `key` if it is present and fresh.
    async fn get(&self, key: &str) -> Option<V>;

    /// Inserts or replaces the value for `key`.
    async fn set(&self, key: String, value: V);
}
