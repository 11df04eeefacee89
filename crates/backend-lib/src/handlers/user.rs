// ============================
// crates/backend-lib/src/handlers/user.rs
// ============================
//! `/users` endpoints.
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
    Extension, Json,
};
use std::sync::Arc;
use tracing::debug;
use webook_common::{ApiMessage, LoginRequest, SignUpRequest, UserProfile};

use crate::auth::start_session;
use crate::domain::User;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::storage::Storage;
use crate::validation::{validate_login, validate_signup};
use crate::AppState;

/// `POST /users/signup`
pub async fn sign_up<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Json<ApiMessage>, AppError> {
    let Json(req) = payload?;
    validate_signup(&req, &state.settings.password_requirements())?;

    state
        .users
        .sign_up(User::new(req.email, req.password))
        .await?;
    Ok(Json(ApiMessage::new("signup ok")))
}

/// `POST /users/login`: starts a session and sets its cookie.
pub async fn login<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload?;
    validate_login(&req)?;

    let user = state.users.login(&req.email, &req.password).await?;
    let key = start_session(state.sessions.as_ref(), user.id, state.gate.max_age()).await?;
    let cookie = state
        .cookie
        .issue_header(&key)
        .ok_or_else(|| AppError::Internal("session cookie is not a valid header".to_string()))?;

    let mut response = Json(UserProfile {
        id: user.id,
        email: user.email,
    })
    .into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

/// `GET /users/profile`: the identity comes from the login gate.
pub async fn profile<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    current: Option<Extension<CurrentUser>>,
) -> Result<Json<UserProfile>, AppError> {
    let Extension(CurrentUser(user_id)) = current.ok_or(AppError::Unauthorized)?;
    debug!(user_id, "profile lookup");

    let user = state.users.profile(user_id).await?;
    Ok(Json(UserProfile {
        id: user.id,
        email: user.email,
    }))
}
