//! Axum adapter for the [`SessionGate`](crate::session::SessionGate).
use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use webook_common::UserId;

use crate::error::AppError;
use crate::session::{Decision, Rejection};
use crate::storage::Storage;
use crate::AppState;

/// Identity of the admitted session, stored in the request extensions for
/// handlers behind [`require_login`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

/// Login gate for every route of the router.
///
/// Ignored paths pass untouched. Refreshed sessions get their cookie
/// re-issued so the browser-side lifetime follows the server-side one.
pub async fn require_login<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_key = state.cookie.session_key(request.headers());
    let path = request.uri().path().to_owned();

    let admission = state.gate.authorize(&path, session_key.as_deref()).await;
    if let Some(identity) = admission.identity {
        request.extensions_mut().insert(CurrentUser(identity));
    }

    match admission.decision {
        Decision::Continue => Ok(next.run(request).await),
        Decision::ContinueWithRefresh => {
            let mut response = next.run(request).await;
            if let Some(cookie) = session_key.and_then(|key| state.cookie.issue_header(&key)) {
                response.headers_mut().append(SET_COOKIE, cookie);
            }
            Ok(response)
        },
        Decision::Reject(Rejection::Unauthorized) => Err(AppError::Unauthorized),
        Decision::Reject(Rejection::InternalError) => {
            Err(AppError::Internal(format!("session check failed for {path}")))
        },
    }
}
