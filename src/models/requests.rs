//! Request DTOs for the management API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Management actions accepted by `POST /admin`.
pub mod actions {
    pub const CLEAR_NAMESPACE: &str = "clear_namespace";
    pub const CLEAR_ALL: &str = "clear_all";
    pub const RELOAD_NAMESPACE: &str = "reload_namespace";
    pub const PRELOAD_ALL: &str = "preload_all";
}

/// Request body for `POST /admin`.
///
/// # Fields
/// - `action`: one of `clear_namespace`, `clear_all`, `reload_namespace`,
///   `preload_all`
/// - `namespace`: required for the namespace-scoped actions
#[derive(Debug, Clone, Deserialize)]
pub struct ManagementRequest {
    /// The management action to perform
    pub action: String,
    /// Target namespace for namespace-scoped actions
    #[serde(default)]
    pub namespace: Option<String>,
}

impl ManagementRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.action.as_str() {
            actions::CLEAR_ALL | actions::PRELOAD_ALL => None,
            actions::CLEAR_NAMESPACE | actions::RELOAD_NAMESPACE => {
                match self.namespace.as_deref() {
                    Some(ns) if !ns.is_empty() => None,
                    _ => Some(format!(
                        "Action '{}' requires a 'namespace' field",
                        self.action
                    )),
                }
            }
            other => Some(format!("Unrecognized action: '{}'", other)),
        }
    }
}
