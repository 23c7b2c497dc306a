//! Cache Module
//!
//! In-memory caching with TTL expiration, LRU eviction, and per-namespace
//! warm-up support.

mod entry;
mod instance;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use instance::{CacheInstance, CacheOptions, ManagedCache, PreloadFn, PreloadOutcome};
pub use lru::LruList;
pub use stats::CacheStats;
pub use store::CacheStore;
