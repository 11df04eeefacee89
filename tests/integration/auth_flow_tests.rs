// =========================
// tests/integration/auth_flow_tests.rs
// =========================
//! Signup, login and gated profile access through the full router
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use std::time::Duration;
use tower::ServiceExt;
use webook_backend_lib::session::SessionStore;

use crate::test_utils::{body_json, request, set_cookie, setup_test_app, TestApp, PASSWORD, T0};

async fn sign_up(t: &TestApp, email: &str) -> StatusCode {
    let body = json!({ "email": email, "password": PASSWORD, "confirmPassword": PASSWORD });
    t.app
        .clone()
        .oneshot(request(Method::POST, "/users/signup", Some(body), None))
        .await
        .unwrap()
        .status()
}

/// Logs in and returns the `name=key` cookie.
async fn log_in(t: &TestApp, email: &str) -> String {
    let body = json!({ "email": email, "password": PASSWORD });
    let response = t
        .app
        .clone()
        .oneshot(request(Method::POST, "/users/login", Some(body), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    set_cookie(&response).expect("login sets the session cookie")
}

#[tokio::test]
async fn test_signup_login_profile() {
    let t = setup_test_app();
    assert_eq!(sign_up(&t, "ada@example.com").await, StatusCode::OK);

    let cookie = log_in(&t, "ada@example.com").await;
    assert!(cookie.starts_with("mysession="));

    let response = t
        .app
        .clone()
        .oneshot(request(Method::GET, "/users/profile", None, Some(cookie.as_str())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    // first gated request after login records the baseline
    assert_eq!(
        response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap(),
        format!("{cookie}; Path=/; Max-Age=60; HttpOnly; SameSite=Lax")
    );

    let body = body_json(response).await;
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_session_refresh_and_expiry() {
    let t = setup_test_app();
    sign_up(&t, "ada@example.com").await;
    let cookie = log_in(&t, "ada@example.com").await;
    let key = cookie.split_once('=').unwrap().1.to_string();

    let profile = || request(Method::GET, "/users/profile", None, Some(cookie.as_str()));

    t.app.clone().oneshot(profile()).await.unwrap();

    t.clock.advance(Duration::from_secs(5));
    let response = t.app.clone().oneshot(profile()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).is_none());

    t.clock.advance(Duration::from_secs(7));
    let response = t.app.clone().oneshot(profile()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).is_some());

    let record = t.sessions.get(&key).await.unwrap().unwrap();
    assert_eq!(record.last_refresh_at().unwrap(), Some(T0 + 12_000));

    // idle past the max age
    t.clock.advance(Duration::from_secs(61));
    let response = t.app.clone().oneshot(profile()).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let t = setup_test_app();
    assert_eq!(sign_up(&t, "ada@example.com").await, StatusCode::OK);
    assert_eq!(sign_up(&t, "ADA@example.com").await, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_validation() {
    let t = setup_test_app();

    let mismatch = json!({
        "email": "ada@example.com",
        "password": PASSWORD,
        "confirmPassword": "hello#world124"
    });
    let response = t
        .app
        .clone()
        .oneshot(request(Method::POST, "/users/signup", Some(mismatch), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VAL_002");

    let weak = json!({ "email": "ada@example.com", "password": "abc", "confirmPassword": "abc" });
    let response = t
        .app
        .clone()
        .oneshot(request(Method::POST, "/users/signup", Some(weak), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_email = json!({ "email": "ada", "password": PASSWORD, "confirmPassword": PASSWORD });
    let response = t
        .app
        .oneshot(request(Method::POST, "/users/signup", Some(bad_email), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let t = setup_test_app();
    sign_up(&t, "ada@example.com").await;

    for (email, password) in [("ada@example.com", "wrong#pass1"), ("bob@example.com", PASSWORD)] {
        let response = t
            .app
            .clone()
            .oneshot(request(
                Method::POST,
                "/users/login",
                Some(json!({ "email": email, "password": password })),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie(&response).is_none());
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "AUTH_002");
    }
}

#[tokio::test]
async fn test_users_survive_restart() {
    let t = setup_test_app();
    sign_up(&t, "ada@example.com").await;

    let settings = t.state.settings.as_ref().clone();
    let restarted = crate::test_utils::setup_test_app_with(t.dir, &settings);
    let cookie = log_in(&restarted, "ada@example.com").await;
    assert!(!cookie.is_empty());
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let t = setup_test_app();

    let incomplete = json!({ "email": "ada@example.com", "password": PASSWORD });
    let response = t
        .app
        .clone()
        .oneshot(request(Method::POST, "/users/signup", Some(incomplete.clone()), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VAL_001");

    // JSON body without a Content-Type header
    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/users/signup")
                .body(Body::from(incomplete.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VAL_001");

    let response = t
        .app
        .oneshot(request(
            Method::POST,
            "/users/login",
            Some(json!({ "email": "ada@example.com" })),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VAL_001");
}
