//! Failure taxonomy of the session gate.
use thiserror::Error;

/// Reasons a gated request cannot be admitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No session, or a session without an identity. Expected, not a fault.
    #[error("session is not authenticated")]
    Unauthenticated,

    /// A stored field exists but does not have the expected type.
    #[error("session field `{field}` is malformed: {reason}")]
    MalformedField { field: &'static str, reason: String },

    /// The session store failed or timed out.
    #[error("session store failure: {0}")]
    Store(String),
}

impl SessionError {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            field,
            reason: reason.into(),
        }
    }
}
