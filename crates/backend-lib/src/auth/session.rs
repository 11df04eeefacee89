// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Session creation at login.
use std::time::Duration;
use webook_common::UserId;

use super::token_generator::generate_secure_token;
use crate::metrics::SESSION_STARTED;
use crate::session::{SessionError, SessionRecord, SessionStore};

/// Create a session for `identity` and return its key.
///
/// The record carries only the identity; the gate records the refresh
/// baseline on the first gated request.
pub async fn start_session(
    store: &dyn SessionStore,
    identity: UserId,
    max_age: Duration,
) -> Result<String, SessionError> {
    let key = generate_secure_token();
    store
        .set(&key, SessionRecord::for_identity(identity), max_age)
        .await?;
    metrics::counter!(SESSION_STARTED).increment(1);
    Ok(key)
}
