//! Session cookie parsing and formatting.
use axum::http::{header, HeaderMap, HeaderValue};
use std::time::Duration;

use crate::config::SessionSettings;

/// Name and attributes of the cookie carrying the session key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    name: String,
    max_age: Duration,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, max_age: Duration, secure: bool) -> Self {
        Self {
            name: name.into(),
            max_age,
            secure,
        }
    }

    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::new(
            settings.cookie_name.clone(),
            Duration::from_secs(settings.max_age_secs),
            settings.secure_cookie,
        )
    }

    /// Session key sent by the client, if any.
    pub fn session_key(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == self.name && !value.is_empty())
            .map(|(_, value)| value.to_string())
    }

    /// `Set-Cookie` value that (re)issues `session_key` for `max_age`.
    pub fn issue(&self, session_key: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name,
            session_key,
            self.max_age.as_secs()
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    pub fn issue_header(&self, session_key: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.issue(session_key)).ok()
    }
}
