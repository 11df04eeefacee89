// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const SESSION_GATE_DECISION: &str = "session_gate.decision";
pub const SESSION_STARTED: &str = "session.started";
pub const USER_SIGNUP: &str = "user.signup";
pub const USER_LOGIN: &str = "user.login";
