//! Warm-up Module
//!
//! Namespace planning and preload-function construction for the host
//! application. Each namespace the application relies on gets its own
//! capacity and TTL tuned to its access pattern; preload functions wrap the
//! data source (typically a database query) that seeds it.

use std::future::Future;
use std::sync::Arc;

use crate::cache::{CacheInstance, CacheOptions, PreloadFn};
use crate::error::Result;
use crate::manager::CacheManager;

// == Namespace Plan ==
/// Sizing for one application namespace.
#[derive(Debug, Clone)]
pub struct NamespacePlan {
    pub namespace: &'static str,
    pub capacity: usize,
    pub default_ttl_secs: u64,
}

/// The namespaces the host application runs on.
///
/// - `members`: frequently-read member rows, invalidated on write
/// - `contracts`: rendered contract templates, long-lived
/// - `finance`: ledger roll-ups, medium-lived
/// - `dashboard`: aggregate statistics, short TTL so staleness is bounded
pub fn standard_plans() -> Vec<NamespacePlan> {
    vec![
        NamespacePlan {
            namespace: "members",
            capacity: 500,
            default_ttl_secs: 600,
        },
        NamespacePlan {
            namespace: "contracts",
            capacity: 200,
            default_ttl_secs: 1800,
        },
        NamespacePlan {
            namespace: "finance",
            capacity: 300,
            default_ttl_secs: 900,
        },
        NamespacePlan {
            namespace: "dashboard",
            capacity: 64,
            default_ttl_secs: 60,
        },
    ]
}

// == Register All ==
/// Registers every plan on the manager with the given value type and no
/// preload function. Idempotent, like `create_cache` itself.
pub async fn register_all<V: Clone + Send + Sync + 'static>(
    manager: &CacheManager,
    plans: &[NamespacePlan],
) -> Result<Vec<Arc<CacheInstance<V>>>> {
    let mut instances = Vec::with_capacity(plans.len());
    for plan in plans {
        let instance = manager
            .create_cache(
                CacheOptions::<V>::new(plan.namespace)
                    .capacity(plan.capacity)
                    .default_ttl_secs(plan.default_ttl_secs),
            )
            .await?;
        instances.push(instance);
    }
    Ok(instances)
}

// == Preload Constructors ==
/// Builds a preload function from a fixed seed set.
///
/// Each invocation hands out a fresh copy of the pairs, so the same function
/// can back repeated reloads.
pub fn preload_static<V: Clone + Send + Sync + 'static>(
    pairs: Vec<(String, V)>,
) -> PreloadFn<V> {
    Arc::new(move || {
        let pairs = pairs.clone();
        Box::pin(async move { Ok(pairs) })
    })
}

/// Wraps an async fetch closure (e.g. a database query) as a preload
/// function.
pub fn preload_with<V, F, Fut>(fetch: F) -> PreloadFn<V>
where
    V: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Vec<(String, V)>>> + Send + 'static,
{
    Arc::new(move || Box::pin(fetch()))
}
