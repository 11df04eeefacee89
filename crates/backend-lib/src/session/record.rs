//! Session fields as stored by a [`SessionStore`](super::SessionStore).
//!
//! The store keeps an untyped JSON map per session. The gate only ever goes
//! through the typed accessors below, which report a type mismatch as
//! [`SessionError::MalformedField`] instead of coercing.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use webook_common::UserId;

use super::clock::Millis;
use super::error::SessionError;

/// Field holding the authenticated user id.
pub const IDENTITY_FIELD: &str = "userId";
/// Field holding the epoch-ms time of the last refresh.
pub const LAST_REFRESH_FIELD: &str = "update_time";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord {
    fields: Map<String, Value>,
}

impl SessionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record for a freshly logged-in user. No refresh baseline yet.
    pub fn for_identity(identity: UserId) -> Self {
        let mut record = Self::new();
        record.insert(IDENTITY_FIELD, Value::from(identity));
        record
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The session's principal. `None` when absent or `null`.
    pub fn identity(&self) -> Result<Option<UserId>, SessionError> {
        read_i64(&self.fields, IDENTITY_FIELD)
    }

    /// Time of the last refresh. `None` until the gate records a baseline.
    pub fn last_refresh_at(&self) -> Result<Option<Millis>, SessionError> {
        read_i64(&self.fields, LAST_REFRESH_FIELD)
    }

    /// Writes identity and refresh time together.
    pub(crate) fn mark_refreshed(&mut self, identity: UserId, now: Millis) {
        self.insert(IDENTITY_FIELD, Value::from(identity));
        self.insert(LAST_REFRESH_FIELD, Value::from(now));
    }
}

fn read_i64(fields: &Map<String, Value>, field: &'static str) -> Result<Option<i64>, SessionError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| SessionError::malformed(field, format!("expected an integer, found {value}"))),
    }
}
