// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request validation for the user endpoints.

use crate::auth::{validate_password_strength, PasswordRequirements};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use webook_common::{LoginRequest, SignUpRequest};

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit
const MAX_PASSWORD_LENGTH: usize = 72;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Possible validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail("Email must not be empty".to_string()));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail("Email format is invalid".to_string()));
    }

    Ok(email)
}

/// Validate a new password against the configured requirements
pub fn validate_password<'a>(
    password: &'a str,
    requirements: &PasswordRequirements,
) -> ValidationResult<&'a str> {
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} bytes"
        )));
    }

    if !validate_password_strength(password, requirements) {
        return Err(ValidationError::InvalidPassword(describe(requirements)));
    }

    Ok(password)
}

/// Validate a signup request
pub fn validate_signup(
    req: &SignUpRequest,
    requirements: &PasswordRequirements,
) -> ValidationResult<()> {
    validate_email(&req.email)?;
    if req.password != req.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    validate_password(&req.password, requirements)?;
    Ok(())
}

/// Validate a login request. Only shape is checked; strength rules may have
/// changed since the account was created.
pub fn validate_login(req: &LoginRequest) -> ValidationResult<()> {
    validate_email(&req.email)?;
    if req.password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn describe(requirements: &PasswordRequirements) -> String {
    let mut parts = vec![format!("at least {} characters", requirements.min_length)];
    if requirements.require_letter {
        parts.push("a letter".to_string());
    }
    if requirements.require_uppercase {
        parts.push("an uppercase letter".to_string());
    }
    if requirements.require_lowercase {
        parts.push("a lowercase letter".to_string());
    }
    if requirements.require_digit {
        parts.push("a digit".to_string());
    }
    if requirements.require_special {
        parts.push("a special character".to_string());
    }
    format!("Password must contain {}", parts.join(", "))
}
