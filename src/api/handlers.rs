//! API Handlers
//!
//! HTTP request handlers for the management surface.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::cache::PreloadOutcome;
use crate::error::{CacheError, Result};
use crate::health::{self, HealthThresholds};
use crate::manager::CacheManager;
use crate::models::{actions, HealthResponse, ManagementRequest, ManagementResponse, StatsEntry};

/// Application state shared across all handlers.
///
/// The manager is injected at construction; handlers never reach for global
/// state.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<CacheManager>,
    pub thresholds: HealthThresholds,
}

impl AppState {
    /// Creates a new AppState over an existing manager.
    pub fn new(manager: Arc<CacheManager>, thresholds: HealthThresholds) -> Self {
        Self {
            manager,
            thresholds,
        }
    }
}

/// Handler for `GET /stats`.
///
/// Returns one statistics entry per live namespace.
pub async fn stats_handler(State(state): State<AppState>) -> Json<Vec<StatsEntry>> {
    let stats = state.manager.all_stats().await;
    Json(stats.into_iter().map(StatsEntry::from).collect())
}

/// Handler for `GET /health`.
///
/// Evaluates the health monitor over current statistics; read-only.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.manager.all_stats().await;
    let report = health::evaluate(&stats, &state.thresholds);
    Json(HealthResponse::from(report))
}

/// Handler for `POST /admin`.
///
/// Dispatches the management actions: `clear_namespace`, `clear_all`,
/// `reload_namespace`, `preload_all`. Malformed requests get a 400 with a
/// clear message; namespace absence is reported in the body, not as an error.
pub async fn admin_handler(
    State(state): State<AppState>,
    Json(req): Json<ManagementRequest>,
) -> Result<Json<ManagementResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let action = req.action.as_str();
    let response = match action {
        actions::CLEAR_NAMESPACE => {
            let namespace = require_namespace(action, req.namespace.clone())?;
            let existed = state.manager.clear_namespace(&namespace).await;
            ManagementResponse::new(action)
                .namespace(namespace)
                .existed(existed)
        }
        actions::CLEAR_ALL => {
            state.manager.clear_all().await;
            ManagementResponse::new(action).detail(format!(
                "{} namespaces cleared",
                state.manager.cache_count().await
            ))
        }
        actions::RELOAD_NAMESPACE => {
            let namespace = require_namespace(action, req.namespace.clone())?;
            match state.manager.reload_namespace(&namespace).await {
                None => ManagementResponse::new(action)
                    .namespace(namespace)
                    .existed(false),
                Some(Ok(PreloadOutcome::Loaded(count))) => ManagementResponse::new(action)
                    .namespace(namespace)
                    .existed(true)
                    .preloaded(true)
                    .detail(format!("loaded {} entries", count)),
                Some(Ok(PreloadOutcome::NotConfigured)) => ManagementResponse::new(action)
                    .namespace(namespace)
                    .existed(true)
                    .preloaded(false)
                    .detail("no preload function configured"),
                Some(Err(err)) => ManagementResponse::new(action)
                    .namespace(namespace)
                    .existed(true)
                    .preloaded(false)
                    .detail(err.to_string()),
            }
        }
        actions::PRELOAD_ALL => {
            state.manager.preload_all().await;
            ManagementResponse::new(action)
                .detail("preload completed; per-namespace failures are logged")
        }
        // validate() already rejected everything else
        other => {
            return Err(CacheError::InvalidRequest(format!(
                "Unrecognized action: '{}'",
                other
            )))
        }
    };

    Ok(Json(response))
}

/// Extracts the namespace field for namespace-scoped actions.
fn require_namespace(action: &str, namespace: Option<String>) -> Result<String> {
    namespace.ok_or_else(|| {
        CacheError::InvalidRequest(format!("Action '{}' requires a 'namespace' field", action))
    })
}
