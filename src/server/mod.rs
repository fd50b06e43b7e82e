//! HTTP surface: the messaging webhook and a health check.

pub mod routes;

pub use routes::{AppState, webhook_routes};
