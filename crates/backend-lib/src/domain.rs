//! Domain types shared by the service and repository layers.
use webook_common::UserId;

/// A user as the business layer sees it. `password` holds whatever the
/// current layer works with: plain text on the way in from a handler, the
/// scrypt hash once the service has processed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: 0,
            email: email.into(),
            password: password.into(),
        }
    }
}
