//! API Routes
//!
//! Configures the Axum router for the management surface.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{admin_handler, health_handler, stats_handler, AppState};

/// Creates the management router.
///
/// # Endpoints
/// - `GET /stats` - Per-namespace cache statistics
/// - `GET /health` - Health monitor verdict
/// - `POST /admin` - Management actions (clear/reload/preload)
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/admin", post(admin_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
