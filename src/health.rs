//! Health Monitor Module
//!
//! Pure computation over registry-wide statistics producing a health verdict
//! and per-namespace recommendations. Read-only: safe to call at arbitrary
//! frequency without affecting the caches it inspects.

use serde::Serialize;

use crate::cache::CacheStats;

// == Health Thresholds ==
/// Tunable limits for the health verdict.
#[derive(Debug, Clone)]
pub struct HealthThresholds {
    /// Overall health requires a global hit rate at or above this value
    pub healthy_global_hit_rate: f64,
    /// A namespace is flagged when its hit rate is below this value
    pub low_namespace_hit_rate: f64,
    /// Namespaces with fewer combined hits+misses than this are never flagged
    pub min_samples: u64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            healthy_global_hit_rate: 0.7,
            low_namespace_hit_rate: 0.5,
            min_samples: 100,
        }
    }
}

// == Health Report ==
/// The structured result of a health evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub is_healthy: bool,
    pub global_hit_rate: f64,
    pub total_caches: usize,
    pub total_hits: u64,
    pub total_misses: u64,
    pub low_hit_rate_namespaces: Vec<String>,
    pub recommendation: String,
}

// == Evaluate ==
/// Computes the health verdict over a set of per-namespace snapshots.
///
/// The global hit rate is total hits over total lookups across all
/// namespaces, 0.0 when no traffic has been recorded. The verdict is a pure
/// function of that rate: a registry with no traffic yet reports degraded
/// until real lookups lift it over the threshold.
pub fn evaluate(stats: &[CacheStats], thresholds: &HealthThresholds) -> HealthReport {
    let total_hits: u64 = stats.iter().map(|s| s.hits).sum();
    let total_misses: u64 = stats.iter().map(|s| s.misses).sum();
    let total_lookups = total_hits + total_misses;

    let global_hit_rate = if total_lookups == 0 {
        0.0
    } else {
        total_hits as f64 / total_lookups as f64
    };

    let low_hit_rate_namespaces: Vec<String> = stats
        .iter()
        .filter(|s| {
            s.hits + s.misses >= thresholds.min_samples
                && s.hit_rate() < thresholds.low_namespace_hit_rate
        })
        .map(|s| s.namespace.clone())
        .collect();

    let is_healthy = global_hit_rate >= thresholds.healthy_global_hit_rate;

    let recommendation = if low_hit_rate_namespaces.is_empty() && is_healthy {
        "Cache layer operating normally".to_string()
    } else if low_hit_rate_namespaces.is_empty() {
        format!(
            "Global hit rate {:.2} is below target {:.2}; consider preloading hot namespaces",
            global_hit_rate, thresholds.healthy_global_hit_rate
        )
    } else {
        format!(
            "Low hit rate in: {}. Consider raising capacity or TTL, or reloading these namespaces",
            low_hit_rate_namespaces.join(", ")
        )
    };

    HealthReport {
        is_healthy,
        global_hit_rate,
        total_caches: stats.len(),
        total_hits,
        total_misses,
        low_hit_rate_namespaces,
        recommendation,
    }
}
