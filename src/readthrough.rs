//! Read-Through Wrapper Module
//!
//! Composes a cache instance with a fallible fetch function: a hit
//! short-circuits the fetch, a miss fetches, stores, and returns. Fetch
//! failures propagate to the caller unchanged and are never cached.

use std::future::Future;

use crate::cache::CacheInstance;

// == Get Or Fetch ==
/// Returns the cached value for `key`, or computes and caches it.
///
/// `fetch` is only invoked on a miss; the successful result is stored with
/// the instance's default TTL before being returned.
pub async fn get_or_fetch<V, F, Fut, E>(
    cache: &CacheInstance<V>,
    key: &str,
    fetch: F,
) -> std::result::Result<V, E>
where
    V: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<V, E>>,
{
    if let Some(hit) = cache.get(key).await {
        return Ok(hit);
    }
    let value = fetch().await?;
    cache.set(key.to_string(), value.clone()).await;
    Ok(value)
}

// == Get Or Fetch With TTL ==
/// Like [`get_or_fetch`] but stores the computed value with an explicit TTL.
pub async fn get_or_fetch_with_ttl<V, F, Fut, E>(
    cache: &CacheInstance<V>,
    key: &str,
    ttl_secs: u64,
    fetch: F,
) -> std::result::Result<V, E>
where
    V: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<V, E>>,
{
    if let Some(hit) = cache.get(key).await {
        return Ok(hit);
    }
    let value = fetch().await?;
    cache.set_with_ttl(key.to_string(), value.clone(), ttl_secs).await;
    Ok(value)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheOptions;
    use crate::keys::build_key;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn cache() -> Arc<CacheInstance<String>> {
        CacheInstance::new(CacheOptions::new("queries")).unwrap()
    }

    #[tokio::test]
    async fn test_miss_fetches_and_caches() {
        let cache = cache();
        let calls = AtomicUsize::new(0);
        let key = build_key("queries", &["member", "42"]);

        let value = get_or_fetch(&cache, &key, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, anyhow::Error>("row".to_string())
        })
        .await
        .unwrap();

        assert_eq!(value, "row");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get(&key).await, Some("row".to_string()));
    }

    #[tokio::test]
    async fn test_hit_skips_fetch() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        cache.set("queries:k".to_string(), "cached".to_string()).await;

        let value = get_or_fetch(&cache, "queries:k", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, anyhow::Error>("fresh".to_string())
        })
        .await
        .unwrap();

        assert_eq!(value, "cached");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates_and_is_not_cached() {
        let cache = cache();

        let result = get_or_fetch(&cache, "queries:boom", || async {
            Err::<String, _>(anyhow::anyhow!("query failed"))
        })
        .await;

        assert!(result.is_err());
        assert!(!cache.has("queries:boom").await);
        // A later successful fetch fills the slot
        let value = get_or_fetch(&cache, "queries:boom", || async {
            Ok::<_, anyhow::Error>("recovered".to_string())
        })
        .await
        .unwrap();
        assert_eq!(value, "recovered");
    }

    #[tokio::test]
    async fn test_ttl_variant_expires() {
        let cache = cache();

        let value = get_or_fetch_with_ttl(&cache, "queries:short", 0, || async {
            Ok::<_, anyhow::Error>("blink".to_string())
        })
        .await
        .unwrap();

        assert_eq!(value, "blink");
        // ttl=0 entries are already expired on the next read
        assert_eq!(cache.get("queries:short").await, None);
    }
}
