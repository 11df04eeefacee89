// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core functionality of the webook user backend: login-gated routes
//! backed by refreshed server-side sessions.

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use crate::auth::SessionCookie;
use crate::config::Settings;
use crate::repository::UserRepository;
use crate::service::UserService;
use crate::session::{Clock, SessionGate, SessionStore};
use crate::storage::Storage;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Signup, login and profile lookups
    pub users: Arc<UserService<S>>,
    /// Login check in front of every route
    pub gate: Arc<SessionGate>,
    /// Store the gate reads from; login writes new sessions here
    pub sessions: Arc<dyn SessionStore>,
    pub cookie: SessionCookie,
    pub settings: Arc<Settings>,
}

impl<S: Storage> AppState<S> {
    /// Wire the state around an explicit session store and clock.
    pub fn new(
        storage: S,
        settings: &Settings,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let repo = UserRepository::new(Arc::new(storage));
        let users = Arc::new(UserService::new(repo, settings.password.scrypt_log_n));
        let gate = Arc::new(SessionGate::new(
            settings.gate_config(),
            sessions.clone(),
            clock,
        ));

        Self {
            users,
            gate,
            sessions,
            cookie: SessionCookie::from_settings(&settings.session),
            settings: Arc::new(settings.clone()),
        }
    }
}
