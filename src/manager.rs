//! Cache Manager Module
//!
//! The registry owning every cache namespace in the process. Explicitly
//! constructed and passed to collaborators; there is no global singleton and
//! no work happens as a side effect of loading the crate. The intended
//! lifecycle is: construct, register namespaces, `preload_all()`, serve
//! traffic, drop on shutdown.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::cache::{
    CacheInstance, CacheOptions, CacheStats, ManagedCache, PreloadOutcome,
};
use crate::error::{CacheError, Result};

// == Cache Manager ==
/// Process-wide registry of cache namespaces.
///
/// The namespace map has its own lock, distinct from each instance's internal
/// lock, so a slow per-instance operation never blocks unrelated namespace
/// creation or lookup.
#[derive(Default)]
pub struct CacheManager {
    caches: RwLock<HashMap<String, Arc<dyn ManagedCache>>>,
}

impl CacheManager {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // == Create Cache ==
    /// Creates and registers a cache instance, or returns the existing one.
    ///
    /// Idempotent per namespace: a second call for a registered namespace
    /// returns the existing instance unchanged. Re-creating a namespace with
    /// a different value type, or passing invalid options, is an
    /// [`CacheError::InvalidConfiguration`].
    pub async fn create_cache<V: Clone + Send + Sync + 'static>(
        &self,
        options: CacheOptions<V>,
    ) -> Result<Arc<CacheInstance<V>>> {
        options.validate()?;

        let mut caches = self.caches.write().await;
        if let Some(existing) = caches.get(&options.namespace) {
            return existing
                .clone()
                .as_any()
                .downcast::<CacheInstance<V>>()
                .map_err(|_| {
                    CacheError::InvalidConfiguration(format!(
                        "namespace '{}' is already registered with a different value type",
                        options.namespace
                    ))
                });
        }

        let namespace = options.namespace.clone();
        let instance = CacheInstance::new(options)?;
        caches.insert(namespace.clone(), instance.clone());
        info!(namespace = %namespace, "cache namespace registered");
        Ok(instance)
    }

    // == Get Cache ==
    /// Looks up the typed handle for a namespace.
    ///
    /// Returns `None` when the namespace does not exist or was registered
    /// with a different value type.
    pub async fn get_cache<V: Clone + Send + Sync + 'static>(
        &self,
        namespace: &str,
    ) -> Option<Arc<CacheInstance<V>>> {
        let caches = self.caches.read().await;
        let cache = caches.get(namespace)?.clone();
        cache.as_any().downcast::<CacheInstance<V>>().ok()
    }

    // == Delete Cache ==
    /// Removes a namespace entirely; returns whether it existed.
    pub async fn delete_cache(&self, namespace: &str) -> bool {
        let removed = self.caches.write().await.remove(namespace).is_some();
        if removed {
            info!(namespace = %namespace, "cache namespace deleted");
        }
        removed
    }

    // == Clear Namespace ==
    /// Clears one namespace's entries and counters; returns whether it
    /// existed. The instance itself stays registered.
    pub async fn clear_namespace(&self, namespace: &str) -> bool {
        let cache = self.caches.read().await.get(namespace).cloned();
        match cache {
            Some(cache) => {
                cache.clear().await;
                true
            }
            None => false,
        }
    }

    // == Clear All ==
    /// Clears every instance; none are deleted.
    pub async fn clear_all(&self) {
        let instances = self.snapshot().await;
        for cache in &instances {
            cache.clear().await;
        }
        info!(caches = instances.len(), "all cache namespaces cleared");
    }

    // == All Stats ==
    /// One snapshot per live instance, sorted by namespace for stable output.
    pub async fn all_stats(&self) -> Vec<CacheStats> {
        let instances = self.snapshot().await;
        let mut stats = Vec::with_capacity(instances.len());
        for cache in instances {
            stats.push(cache.stats().await);
        }
        stats.sort_by(|a, b| a.namespace.cmp(&b.namespace));
        stats
    }

    // == Cache Count ==
    pub async fn cache_count(&self) -> usize {
        self.caches.read().await.len()
    }

    // == Preload All ==
    /// Runs every instance's preload concurrently.
    ///
    /// Failures are isolated per namespace: they are logged and swallowed so
    /// one broken data source cannot block warm-up of unrelated namespaces.
    pub async fn preload_all(&self) {
        let instances = self.snapshot().await;
        let mut tasks = JoinSet::new();
        for cache in instances {
            tasks.spawn(async move {
                let namespace = cache.namespace().to_string();
                (namespace, cache.preload().await)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(PreloadOutcome::Loaded(_)))) => {}
                Ok((namespace, Ok(PreloadOutcome::NotConfigured))) => {
                    info!(namespace = %namespace, "no preload configured, starting cold");
                }
                Ok((namespace, Err(err))) => {
                    warn!(namespace = %namespace, error = %err, "preload failed, namespace stays cold");
                }
                Err(join_err) => {
                    warn!(error = %join_err, "preload task panicked");
                }
            }
        }
    }

    // == Reload Namespace ==
    /// Re-runs one namespace's preload on demand.
    ///
    /// Returns `None` when the namespace does not exist; otherwise the
    /// preload outcome, with failures surfaced to the caller.
    pub async fn reload_namespace(
        &self,
        namespace: &str,
    ) -> Option<Result<PreloadOutcome>> {
        let cache = self.caches.read().await.get(namespace).cloned()?;
        Some(cache.reload().await)
    }

    // == Sweep All ==
    /// Drops expired entries in every namespace; returns the total removed.
    pub async fn sweep_all(&self) -> usize {
        let instances = self.snapshot().await;
        let mut removed = 0;
        for cache in instances {
            removed += cache.sweep_expired().await;
        }
        removed
    }

    /// Clones the current instance set out of the registry lock so that
    /// per-instance work never holds it.
    async fn snapshot(&self) -> Vec<Arc<dyn ManagedCache>> {
        self.caches.read().await.values().cloned().collect()
    }
}
