//! Integration tests for registration and authentication.

mod common;

use axum::http::StatusCode;
use common::{TEST_PASSWORD, TestApp};

#[tokio::test]
async fn test_signup_login_and_profile() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_id, _token) = app
        .signup_donor("Alice", "alice@example.com", "+15550000001")
        .await;

    let body = serde_json::json!({ "email": "alice@example.com", "password": TEST_PASSWORD });
    let response = app.request("POST", "/api/auth/login", Some(body), None).await;
    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["token"].as_str().unwrap().to_string();

    let profile = app
        .request("GET", "/api/donor/profile", None, Some(&token))
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["name"], "Alice");
    assert_eq!(profile.body["bloodGroup"], "O+");
    assert!(profile.body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_a_conflict() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.signup_donor("Bob", "bob@example.com", "+15550000002")
        .await;

    let body = serde_json::json!({
        "name": "Bob Again",
        "email": "bob@example.com",
        "password": TEST_PASSWORD,
        "bloodGroup": "A-",
        "location": "Springfield",
        "phoneNumber": "+15550000003",
    });
    let response = app.request("POST", "/api/auth/signup", Some(body), None).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.signup_donor("Carol", "carol@example.com", "+15550000004")
        .await;

    let body = serde_json::json!({ "email": "carol@example.com", "password": "wrong-password-9" });
    let response = app.request("POST", "/api/auth/login", Some(body), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check_email_reports_existence() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.signup_donor("Dave", "dave@example.com", "+15550000005")
        .await;

    let taken = app
        .request("GET", "/api/auth/check-email?email=dave@example.com", None, None)
        .await;
    assert_eq!(taken.status, StatusCode::OK);
    assert_eq!(taken.body["exists"], true);

    let free = app
        .request("GET", "/api/auth/check-email?email=nobody@example.com", None, None)
        .await;
    assert_eq!(free.body["exists"], false);
}

#[tokio::test]
async fn test_requests_require_a_bearer_token() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app.request("GET", "/api/donor/profile", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/donor/profile", None, Some("not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_weak_signup_password_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let body = serde_json::json!({
        "name": "Eve",
        "email": "eve@example.com",
        "password": "password123",
        "bloodGroup": "B+",
        "location": "Springfield",
        "phoneNumber": "+15550000006",
    });
    let response = app.request("POST", "/api/auth/signup", Some(body), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
