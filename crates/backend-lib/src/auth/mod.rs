// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication helpers: password hashing, session keys and cookies.
pub mod cookie;
pub mod password;
pub mod session;
pub mod token_generator;

pub use cookie::SessionCookie;
pub use password::{
    hash_password, hash_password_secure, validate_password_strength, verify_password,
    PasswordRequirements, MIN_PASSWORD_LENGTH,
};
pub use session::start_session;
pub use token_generator::generate_secure_token;
