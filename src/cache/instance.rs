//! Cache Instance Module
//!
//! Wraps the eviction core behind an instance-level lock and adds the
//! preload/warm-up contract. Each namespace owns exactly one instance.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{CacheError, Result};

/// A caller-supplied warm-up function producing initial key/value pairs.
///
/// May perform I/O (e.g. a database query); it always runs outside the
/// instance lock.
pub type PreloadFn<V> =
    Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<Vec<(String, V)>>> + Send + Sync>;

// == Cache Options ==
/// Configuration for creating a cache instance.
pub struct CacheOptions<V> {
    /// Unique namespace identifier
    pub namespace: String,
    /// Maximum number of live entries, must be > 0
    pub capacity: usize,
    /// Default TTL in seconds for entries without an explicit TTL
    pub default_ttl_secs: u64,
    /// Optional warm-up function
    pub preload_fn: Option<PreloadFn<V>>,
}

impl<V> CacheOptions<V> {
    /// Starts options for `namespace` with the stock capacity (1000 entries)
    /// and TTL (300 seconds).
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            capacity: 1000,
            default_ttl_secs: 300,
            preload_fn: None,
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn default_ttl_secs(mut self, secs: u64) -> Self {
        self.default_ttl_secs = secs;
        self
    }

    pub fn preload_with(mut self, preload_fn: PreloadFn<V>) -> Self {
        self.preload_fn = Some(preload_fn);
        self
    }

    /// Rejects misconfiguration before any store is constructed.
    pub fn validate(&self) -> Result<()> {
        if self.namespace.is_empty() {
            return Err(CacheError::InvalidConfiguration(
                "namespace must not be empty".to_string(),
            ));
        }
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfiguration(format!(
                "namespace '{}': capacity must be greater than zero",
                self.namespace
            )));
        }
        Ok(())
    }
}

// == Preload Outcome ==
/// Result of a successful preload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadOutcome {
    /// The preload function ran and produced this many pairs
    Loaded(usize),
    /// The instance has no preload function; nothing to do
    NotConfigured,
}

// == Cache Instance ==
/// One namespace's cache: the eviction core behind a single lock, plus an
/// optional warm-up function.
///
/// All operations acquire the lock for the duration of one in-memory store
/// call; critical sections never await and never perform I/O.
pub struct CacheInstance<V> {
    namespace: String,
    store: RwLock<CacheStore<V>>,
    preload_fn: Option<PreloadFn<V>>,
}

impl<V: Clone + Send + Sync + 'static> CacheInstance<V> {
    // == Constructor ==
    /// Creates an instance from validated options.
    pub fn new(options: CacheOptions<V>) -> Result<Arc<Self>> {
        options.validate()?;
        Ok(Arc::new(Self {
            store: RwLock::new(CacheStore::new(
                options.namespace.clone(),
                options.capacity,
                options.default_ttl_secs,
            )),
            namespace: options.namespace,
            preload_fn: options.preload_fn,
        }))
    }

    /// The namespace this instance serves.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    // == Get ==
    /// Retrieves a value; `None` for absent or expired keys.
    pub async fn get(&self, key: &str) -> Option<V> {
        // Write lock: a read mutates recency order and counters
        self.store.write().await.get(key)
    }

    // == Set ==
    /// Stores a value with the instance's default TTL.
    pub async fn set(&self, key: String, value: V) {
        self.store.write().await.set(key, value, None);
    }

    // == Set With TTL ==
    /// Stores a value with an explicit TTL in seconds.
    pub async fn set_with_ttl(&self, key: String, value: V, ttl_secs: u64) {
        self.store.write().await.set(key, value, Some(ttl_secs));
    }

    // == Has ==
    /// Existence probe without hit/miss accounting or recency changes.
    pub async fn has(&self, key: &str) -> bool {
        self.store.write().await.has(key)
    }

    // == Delete ==
    /// Removes a key; returns whether a removal occurred.
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Clear ==
    /// Removes all entries and resets counters.
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Length ==
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Sweep Expired ==
    /// Drops expired entries; counter-identical to the lazy expiry path.
    pub async fn sweep_expired(&self) -> usize {
        self.store.write().await.sweep_expired()
    }

    // == Preload ==
    /// Runs the warm-up function, if any, and applies its pairs through the
    /// normal `set` path (per-entry locking; the instance stays queryable
    /// while a preload is in flight).
    ///
    /// On failure the store is left in its prior state and the error is
    /// returned as [`CacheError::PreloadFailure`].
    pub async fn preload(&self) -> Result<PreloadOutcome> {
        match self.fetch_pairs().await {
            None => Ok(PreloadOutcome::NotConfigured),
            Some(Ok(pairs)) => {
                let count = pairs.len();
                for (key, value) in pairs {
                    self.set(key, value).await;
                }
                info!(namespace = %self.namespace, entries = count, "preload complete");
                Ok(PreloadOutcome::Loaded(count))
            }
            Some(Err(source)) => Err(CacheError::PreloadFailure {
                namespace: self.namespace.clone(),
                source,
            }),
        }
    }

    // == Reload ==
    /// Re-runs the warm-up function, replacing the current contents.
    ///
    /// The fetch happens first; only on success is the store cleared and
    /// repopulated, so a failed reload leaves the prior state untouched while
    /// a successful one ends in a well-defined, freshly-loaded state.
    pub async fn reload(&self) -> Result<PreloadOutcome> {
        match self.fetch_pairs().await {
            None => Ok(PreloadOutcome::NotConfigured),
            Some(Ok(pairs)) => {
                self.clear().await;
                let count = pairs.len();
                for (key, value) in pairs {
                    self.set(key, value).await;
                }
                info!(namespace = %self.namespace, entries = count, "reload complete");
                Ok(PreloadOutcome::Loaded(count))
            }
            Some(Err(source)) => Err(CacheError::PreloadFailure {
                namespace: self.namespace.clone(),
                source,
            }),
        }
    }

    /// Invokes the preload function outside the lock.
    async fn fetch_pairs(&self) -> Option<anyhow::Result<Vec<(String, V)>>> {
        let preload_fn = self.preload_fn.as_ref()?;
        debug!(namespace = %self.namespace, "running preload function");
        Some(preload_fn().await)
    }
}

// == Managed Cache ==
/// Type-erased view of a cache instance, as held by the registry.
///
/// Covers every operation the registry and the management surface need
/// without knowing the namespace's value type.
#[async_trait]
pub trait ManagedCache: Send + Sync {
    fn namespace(&self) -> &str;
    async fn stats(&self) -> CacheStats;
    async fn clear(&self);
    async fn preload(&self) -> Result<PreloadOutcome>;
    async fn reload(&self) -> Result<PreloadOutcome>;
    async fn sweep_expired(&self) -> usize;
    /// Typed handle recovery for `CacheManager::get_cache`.
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

#[async_trait]
impl<V: Clone + Send + Sync + 'static> ManagedCache for CacheInstance<V> {
    fn namespace(&self) -> &str {
        CacheInstance::namespace(self)
    }

    async fn stats(&self) -> CacheStats {
        CacheInstance::stats(self).await
    }

    async fn clear(&self) {
        CacheInstance::clear(self).await;
    }

    async fn preload(&self) -> Result<PreloadOutcome> {
        CacheInstance::preload(self).await
    }

    async fn reload(&self) -> Result<PreloadOutcome> {
        CacheInstance::reload(self).await
    }

    async fn sweep_expired(&self) -> usize {
        CacheInstance::sweep_expired(self).await
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn instance(namespace: &str) -> Arc<CacheInstance<String>> {
        CacheInstance::new(CacheOptions::new(namespace)).unwrap()
    }

    #[tokio::test]
    async fn test_instance_roundtrip() {
        let cache = instance("members");

        cache.set("members:member:1".to_string(), "ada".to_string()).await;

        assert_eq!(cache.get("members:member:1").await, Some("ada".to_string()));
        assert_eq!(cache.get("members:member:2").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_instance_rejects_zero_capacity() {
        let result = CacheInstance::<String>::new(CacheOptions::new("bad").capacity(0));
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_instance_rejects_empty_namespace() {
        let result = CacheInstance::<String>::new(CacheOptions::new(""));
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_instance_set_with_ttl_expires() {
        let cache = instance("short");

        cache.set_with_ttl("k".to_string(), "v".to_string(), 0).await;

        assert_eq!(cache.get("k").await, None);
        assert_eq!(cache.stats().await.expired_removals, 1);
    }

    #[tokio::test]
    async fn test_preload_not_configured() {
        let cache = instance("cold");
        assert_eq!(cache.preload().await.unwrap(), PreloadOutcome::NotConfigured);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_preload_populates_store() {
        let preload: PreloadFn<String> = Arc::new(|| {
            Box::pin(async {
                Ok(vec![
                    ("warm:1".to_string(), "one".to_string()),
                    ("warm:2".to_string(), "two".to_string()),
                ])
            })
        });
        let cache = CacheInstance::new(
            CacheOptions::new("warm").preload_with(preload),
        )
        .unwrap();

        assert_eq!(cache.preload().await.unwrap(), PreloadOutcome::Loaded(2));
        assert_eq!(cache.get("warm:1").await, Some("one".to_string()));
        assert_eq!(cache.get("warm:2").await, Some("two".to_string()));
    }

    #[tokio::test]
    async fn test_preload_failure_leaves_prior_state() {
        let preload: PreloadFn<String> =
            Arc::new(|| Box::pin(async { Err(anyhow::anyhow!("database unavailable")) }));
        let cache = CacheInstance::new(
            CacheOptions::new("broken").preload_with(preload),
        )
        .unwrap();

        cache.set("existing".to_string(), "kept".to_string()).await;

        let err = cache.preload().await.unwrap_err();
        assert!(matches!(err, CacheError::PreloadFailure { .. }));
        assert_eq!(cache.get("existing").await, Some("kept".to_string()));
    }

    #[tokio::test]
    async fn test_preload_respects_capacity() {
        let preload: PreloadFn<u32> = Arc::new(|| {
            Box::pin(async {
                Ok((0..5).map(|i| (format!("k{}", i), i)).collect())
            })
        });
        let cache = CacheInstance::new(
            CacheOptions::new("tiny").capacity(2).preload_with(preload),
        )
        .unwrap();

        assert_eq!(cache.preload().await.unwrap(), PreloadOutcome::Loaded(5));

        // Earliest-loaded pairs were evicted first
        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.stats().await.evictions, 3);
        assert!(cache.has("k3").await);
        assert!(cache.has("k4").await);
    }

    #[tokio::test]
    async fn test_reload_replaces_contents() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_fn = calls.clone();
        let preload: PreloadFn<String> = Arc::new(move || {
            let n = calls_in_fn.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { Ok(vec![(format!("seed:{}", n), "v".to_string())]) })
        });
        let cache = CacheInstance::new(
            CacheOptions::new("rolling").preload_with(preload),
        )
        .unwrap();

        cache.preload().await.unwrap();
        cache.set("stale".to_string(), "old".to_string()).await;

        assert_eq!(cache.reload().await.unwrap(), PreloadOutcome::Loaded(1));

        // Reload cleared prior contents before applying fresh pairs
        assert_eq!(cache.get("stale").await, None);
        assert_eq!(cache.get("seed:0").await, None);
        assert_eq!(cache.get("seed:1").await, Some("v".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reload_failure_preserves_contents() {
        let preload: PreloadFn<String> =
            Arc::new(|| Box::pin(async { Err(anyhow::anyhow!("upstream down")) }));
        let cache = CacheInstance::new(
            CacheOptions::new("safe").preload_with(preload),
        )
        .unwrap();

        cache.set("kept".to_string(), "v".to_string()).await;

        assert!(cache.reload().await.is_err());
        assert_eq!(cache.get("kept").await, Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_sets_respect_capacity() {
        let cache = CacheInstance::new(
            CacheOptions::new("busy").capacity(8),
        )
        .unwrap();

        let mut handles = Vec::new();
        for task in 0..4 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50u32 {
                    cache.set(format!("t{}:k{}", task, i), i).await;
                    cache.get(&format!("t{}:k{}", task, i)).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stats = cache.stats().await;
        assert!(stats.size <= 8);
        assert_eq!(stats.hits + stats.misses, 200);
    }
}
