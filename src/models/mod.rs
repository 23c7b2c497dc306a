//! Data Transfer Objects
//!
//! Request and response structures for the management API.

mod requests;
mod responses;

pub use requests::{actions, ManagementRequest};
pub use responses::{ErrorResponse, HealthResponse, ManagementResponse, StatsEntry};
