//! Cachehub - a process-wide cache management layer
//!
//! Maintains multiple independently-configured, bounded, time-expiring
//! key/value caches ("namespaces") with LRU eviction, hit-rate health
//! reporting, and operator-facing warm/inspect/invalidate controls.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod health;
pub mod keys;
pub mod manager;
pub mod models;
pub mod readthrough;
pub mod tasks;
pub mod warmup;

pub use api::AppState;
pub use cache::{CacheInstance, CacheOptions, CacheStats, PreloadFn, PreloadOutcome};
pub use config::Config;
pub use error::CacheError;
pub use manager::CacheManager;
pub use tasks::spawn_sweeper_task;
