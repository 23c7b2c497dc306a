//! Error types for the cache management layer
//!
//! Provides unified error handling using thiserror.
//!
//! Absence of a key or namespace on the data path is never an error; it is
//! modeled as `Option`/`bool` returns. Only configuration, preload, and
//! malformed management requests can fail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache management layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Creating a cache with an empty namespace or zero capacity; a
    /// programmer error surfaced at `create_cache` time
    #[error("Invalid cache configuration: {0}")]
    InvalidConfiguration(String),

    /// The caller-supplied preload function failed; the namespace is left in
    /// its prior state and remains usable cold
    #[error("Preload failed for namespace '{namespace}': {source}")]
    PreloadFailure {
        namespace: String,
        #[source]
        source: anyhow::Error,
    },

    /// Malformed management request (unrecognized action, missing namespace)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidConfiguration(_) | CacheError::PreloadFailure { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache management layer.
pub type Result<T> = std::result::Result<T, CacheError>;
