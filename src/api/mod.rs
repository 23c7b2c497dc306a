//! API Module
//!
//! The operator-facing HTTP management surface: statistics, health, and
//! cache administration.

mod handlers;
mod routes;

pub use handlers::AppState;
pub use routes::create_router;
