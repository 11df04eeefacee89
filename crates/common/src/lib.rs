// ================
// common/src/lib.rs
// ================
//! Request and response bodies exchanged between the webook frontend and
//! the backend's `/users` endpoints.

use serde::{Deserialize, Serialize};

/// User identifier as stored in the user table and in the session.
pub type UserId = i64;

/// Body of `POST /users/signup`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Account email, unique across users
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Must equal `password`
    pub confirm_password: String,
}

/// Body of `POST /users/login`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `GET /users/profile`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
}

/// Plain acknowledgement body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
