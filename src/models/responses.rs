//! Response DTOs for the management API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::health::HealthReport;

/// One namespace's statistics as served by `GET /stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsEntry {
    pub namespace: String,
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// hits / (hits + misses), 0.0 when no lookups were recorded
    pub hit_rate: f64,
    pub expired_removals: u64,
    pub evictions: u64,
}

impl From<CacheStats> for StatsEntry {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self {
            namespace: stats.namespace,
            size: stats.size,
            capacity: stats.capacity,
            hits: stats.hits,
            misses: stats.misses,
            hit_rate,
            expired_removals: stats.expired_removals,
            evictions: stats.evictions,
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    pub global_hit_rate: f64,
    pub total_caches: usize,
    pub total_hits: u64,
    pub total_misses: u64,
    pub low_hit_rate_namespaces: Vec<String>,
    pub recommendation: String,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        Self {
            status: if report.is_healthy {
                "healthy".to_string()
            } else {
                "degraded".to_string()
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
            global_hit_rate: report.global_hit_rate,
            total_caches: report.total_caches,
            total_hits: report.total_hits,
            total_misses: report.total_misses,
            low_hit_rate_namespaces: report.low_hit_rate_namespaces,
            recommendation: report.recommendation,
        }
    }
}

/// Response body for `POST /admin`.
#[derive(Debug, Clone, Serialize)]
pub struct ManagementResponse {
    /// The action that was performed
    pub action: String,
    /// Target namespace, for namespace-scoped actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Whether the target namespace existed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existed: Option<bool>,
    /// Whether a reload's preload succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preloaded: Option<bool>,
    /// Human-readable outcome detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ManagementResponse {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            namespace: None,
            existed: None,
            preloaded: None,
            detail: None,
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn existed(mut self, existed: bool) -> Self {
        self.existed = Some(existed);
        self
    }

    pub fn preloaded(mut self, preloaded: bool) -> Self {
        self.preloaded = Some(preloaded);
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Error response body for all error conditions.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}
