//! Session-backed login gating.
//!
//! [`SessionGate`] combines an [`ExemptionSet`], a [`RefreshPolicy`] and a
//! [`SessionStore`] into a framework-agnostic per-request decision. The axum
//! adapter lives in [`crate::middleware::login`].

pub mod clock;
pub mod error;
pub mod exemption;
pub mod gate;
pub mod record;
pub mod refresh;
pub mod store;

pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use error::SessionError;
pub use exemption::ExemptionSet;
pub use gate::{Admission, Decision, GateConfig, Rejection, SessionGate, SessionGateBuilder, DEFAULT_SESSION_MAX_AGE};
pub use record::{SessionRecord, IDENTITY_FIELD, LAST_REFRESH_FIELD};
pub use refresh::{RefreshPolicy, DEFAULT_REFRESH_INTERVAL};
pub use store::{MemorySessionStore, SessionStore};
