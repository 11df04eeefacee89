//! HTTP handlers.
pub mod user;

/// Health check endpoint
pub async fn health_handler() -> &'static str {
    "Healthy"
}
