// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router: routes, login gate, CORS and request tracing.
use axum::{
    http::{header, request::Parts, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::CorsSettings;
use crate::handlers::{health_handler, user};
use crate::middleware::require_login;
use crate::storage::Storage;
use crate::AppState;

/// Response header browsers may read cross-origin.
pub const EXPOSED_TOKEN_HEADER: &str = "x-jwt-token";

/// Create the application router
pub fn create_router<S: Storage + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = cors_layer(&state.settings.cors);

    Router::new()
        .route("/health", get(health_handler))
        .route("/users/signup", post(user::sign_up::<S>))
        .route("/users/login", post(user::login::<S>))
        .route("/users/profile", get(user::profile::<S>))
        .layer(middleware::from_fn_with_state(state.clone(), require_login::<S>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS with credentials. An origin is allowed when it is plain `http://`
/// (if enabled) or contains the configured company suffix.
pub fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let suffix = settings.allowed_origin_suffix.clone();
    let allow_http = settings.allow_any_http_origin;

    CorsLayer::new()
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([HeaderName::from_static(EXPOSED_TOKEN_HEADER)])
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                let origin = origin.to_str().unwrap_or_default();
                (allow_http && origin.starts_with("http://"))
                    || (!suffix.is_empty() && origin.contains(suffix.as_str()))
            },
        ))
        .max_age(Duration::from_secs(settings.max_age_secs))
}
