// ============================
// crates/backend-lib/src/session/gate.rs
// ============================
/** Per-request login check with throttled session refresh.

The gate answers one question per request: may it proceed, and does the
session need its expiry extended first? It owns no session state; every
read and write goes through the [`SessionStore`]. */
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, warn};
use webook_common::UserId;

use super::clock::Clock;
use super::error::SessionError;
use super::exemption::ExemptionSet;
use super::refresh::{RefreshPolicy, DEFAULT_REFRESH_INTERVAL};
use super::store::SessionStore;
use crate::metrics::SESSION_GATE_DECISION;

/// Default lifetime granted to a session by each refresh.
pub const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(60);

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No authenticated session; maps to 401.
    Unauthorized,
    /// Corrupt session data or a store failure; maps to 500.
    InternalError,
}

/// Outcome of [`SessionGate::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Continue,
    ContinueWithRefresh,
    Reject(Rejection),
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        !matches!(self, Decision::Reject(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Continue => "continue",
            Decision::ContinueWithRefresh => "refresh",
            Decision::Reject(Rejection::Unauthorized) => "unauthorized",
            Decision::Reject(Rejection::InternalError) => "internal_error",
        }
    }
}

/// Decision of [`SessionGate::authorize`] with the identity it was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub decision: Decision,
    /// Set only for admitted requests on gated paths.
    pub identity: Option<UserId>,
}

/// Construction-time settings of a [`SessionGate`].
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub exemptions: ExemptionSet,
    pub refresh_interval: Duration,
    pub max_age: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            exemptions: ExemptionSet::new(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            max_age: DEFAULT_SESSION_MAX_AGE,
        }
    }
}

/// Fluent registration of ignored paths and timings.
#[derive(Debug, Clone, Default)]
pub struct SessionGateBuilder {
    config: GateConfig,
}

impl SessionGateBuilder {
    pub fn ignore_path(mut self, path: impl Into<String>) -> Self {
        self.config.exemptions.add(path);
        self
    }

    pub fn ignore_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.exemptions.extend(paths);
        self
    }

    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.config.refresh_interval = interval;
        self
    }

    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.config.max_age = max_age;
        self
    }

    pub fn build(self, store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>) -> SessionGate {
        SessionGate::new(self.config, store, clock)
    }
}

pub struct SessionGate {
    exemptions: ExemptionSet,
    policy: RefreshPolicy,
    max_age: Duration,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
}

impl SessionGate {
    pub fn new(config: GateConfig, store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            exemptions: config.exemptions,
            policy: RefreshPolicy::new(config.refresh_interval),
            max_age: config.max_age,
            store,
            clock,
        }
    }

    pub fn builder() -> SessionGateBuilder {
        SessionGateBuilder::default()
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Decide whether a request for `path`, carrying `session_key`, may
    /// proceed. Exempt paths never touch the store. A due refresh is written
    /// back in a single `set` before the decision is returned.
    pub async fn admit(&self, path: &str, session_key: Option<&str>) -> Decision {
        self.authorize(path, session_key).await.decision
    }

    /// Same as [`admit`](Self::admit), also returning the identity the
    /// session was admitted for.
    pub async fn authorize(&self, path: &str, session_key: Option<&str>) -> Admission {
        let admission = if self.exemptions.is_exempt(path) {
            Admission {
                decision: Decision::Continue,
                identity: None,
            }
        } else {
            match self.check(session_key).await {
                Ok((decision, identity)) => Admission {
                    decision,
                    identity: Some(identity),
                },
                Err(err) => Admission {
                    decision: Decision::Reject(reject(path, &err)),
                    identity: None,
                },
            }
        };
        metrics::counter!(SESSION_GATE_DECISION, "outcome" => admission.decision.as_str())
            .increment(1);
        admission
    }

    async fn check(&self, session_key: Option<&str>) -> Result<(Decision, UserId), SessionError> {
        let key = session_key.ok_or(SessionError::Unauthenticated)?;
        let mut record = self
            .store
            .get(key)
            .await?
            .ok_or(SessionError::Unauthenticated)?;
        let identity = record.identity()?.ok_or(SessionError::Unauthenticated)?;
        let last_refresh_at = record.last_refresh_at()?;

        let now = self.clock.now_millis();
        if !self.policy.should_refresh(now, last_refresh_at) {
            return Ok((Decision::Continue, identity));
        }

        record.mark_refreshed(identity, now);
        self.store.set(key, record, self.max_age).await?;
        debug!(user_id = identity, refreshed_at = now, "session refreshed");
        Ok((Decision::ContinueWithRefresh, identity))
    }
}

fn reject(path: &str, err: &SessionError) -> Rejection {
    match err {
        SessionError::Unauthenticated => {
            debug!(path, "request has no authenticated session");
            Rejection::Unauthorized
        },
        SessionError::MalformedField { .. } => {
            warn!(path, error = %err, "rejecting request with corrupt session");
            Rejection::InternalError
        },
        SessionError::Store(_) => {
            error!(path, error = %err, "session store unavailable");
            Rejection::InternalError
        },
    }
}
