// =========================
// tests/unit/error_tests.rs
// =========================
//! Unit tests for the error module
use axum::{http::StatusCode, response::IntoResponse};
use std::io::{Error as IoError, ErrorKind};
use webook_backend_lib::{error::AppError, session::SessionError, validation::ValidationError};

use crate::test_utils::body_json;

#[test]
fn test_app_error_display() {
    assert_eq!(AppError::Unauthorized.to_string(), "Login required");
    assert_eq!(AppError::DuplicateEmail.to_string(), "Email already registered");

    let io_error = AppError::Io(IoError::new(ErrorKind::NotFound, "File not found"));
    assert!(io_error.to_string().contains("IO error"));
}

#[test]
fn test_app_error_status_codes() {
    assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        AppError::Session(SessionError::Unauthenticated).status_code(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::Session(SessionError::Store("down".to_string())).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(AppError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
    assert_eq!(AppError::UserNotFound(3).status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        AppError::Validation(ValidationError::PasswordMismatch).status_code(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_internal_error_response() {
    let response = AppError::Internal("db password is hunter2".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INT_001");

    let sanitized = AppError::Internal("db password is hunter2".to_string()).sanitized_message();
    assert!(!sanitized.contains("hunter2"));
}

#[tokio::test]
async fn test_validation_message_is_shown() {
    let response = AppError::from(ValidationError::PasswordMismatch).into_response();
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VAL_002");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Passwords do not match"));
}
