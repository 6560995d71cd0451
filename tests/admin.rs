//! Integration tests for admin moderation of the donor pool.

mod common;

use axum::http::StatusCode;
use common::{TEST_PASSWORD, TestApp};

#[tokio::test]
async fn test_admin_login_rejects_regular_donors() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.signup_donor("Alice", "alice@admin.test", "+15552000001")
        .await;

    let body = serde_json::json!({ "email": "alice@admin.test", "password": TEST_PASSWORD });
    let response = app.request("POST", "/api/admin/login", Some(body), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_endpoints_require_admin_role() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_id, token) = app
        .signup_donor("Bob", "bob@admin.test", "+15552000002")
        .await;

    let response = app.request("GET", "/api/admin/stats", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_stats_counts_donors_and_pending_requests() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_admin_id, admin_token) = app.create_admin("root@admin.test").await;
    let (_r_id, r_token) = app
        .signup_donor("Requester", "req@admin.test", "+15552000003")
        .await;
    let (d_id, _d_token) = app
        .signup_donor("Donor", "don@admin.test", "+15552000004")
        .await;

    let body = serde_json::json!({ "donorId": d_id });
    app.request("POST", "/api/donor/request", Some(body), Some(&r_token))
        .await;

    let stats = app
        .request("GET", "/api/admin/stats", None, Some(&admin_token))
        .await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["activeRequests"], 1);
    assert_eq!(stats.body["totalDonors"], 3);
    // O+ donors: requester and donor (the admin is AB+)
    assert_eq!(stats.body["donorsByBloodGroup"]["O+"], 2);
    assert_eq!(stats.body["donorsByBloodGroup"]["A-"], 0);
}

#[tokio::test]
async fn test_suspended_donor_cannot_receive_requests() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_admin_id, admin_token) = app.create_admin("root2@admin.test").await;
    let (_r_id, r_token) = app
        .signup_donor("Requester", "req2@admin.test", "+15552000005")
        .await;
    let (d_id, _d_token) = app
        .signup_donor("Donor", "don2@admin.test", "+15552000006")
        .await;

    let body = serde_json::json!({ "status": "suspended", "reason": "spam reports" });
    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/donors/{d_id}/status"),
            Some(body),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "suspended");

    let body = serde_json::json!({ "donorId": d_id });
    let refused = app
        .request("POST", "/api/donor/request", Some(body), Some(&r_token))
        .await;
    assert_eq!(refused.status, StatusCode::CONFLICT);
    assert_eq!(refused.body["error"], "DONOR_SUSPENDED");

    // Suspended donors disappear from search as well
    let search = app
        .request(
            "GET",
            "/api/donor/search?location=Springfield",
            None,
            Some(&r_token),
        )
        .await;
    assert_eq!(search.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_verify_and_filtered_listing() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_admin_id, admin_token) = app.create_admin("root3@admin.test").await;
    let (d_id, _d_token) = app
        .signup_donor("Donor", "don3@admin.test", "+15552000007")
        .await;

    let body = serde_json::json!({ "verified": true, "note": "documents checked" });
    let verified = app
        .request(
            "PATCH",
            &format!("/api/admin/donors/{d_id}/verify"),
            Some(body),
            Some(&admin_token),
        )
        .await;
    assert_eq!(verified.status, StatusCode::OK);
    assert_eq!(verified.body["verified"], true);

    let listed = app
        .request(
            "GET",
            "/api/admin/donors?query=don3&bloodGroup=O%2B",
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["items"].as_array().unwrap().len(), 1);
    assert_eq!(listed.body["items"][0]["verified"], true);
}

#[tokio::test]
async fn test_delete_donor() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_admin_id, admin_token) = app.create_admin("root4@admin.test").await;
    let (d_id, d_token) = app
        .signup_donor("Donor", "don4@admin.test", "+15552000008")
        .await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/admin/donors/{d_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let profile = app
        .request("GET", "/api/donor/profile", None, Some(&d_token))
        .await;
    assert_eq!(profile.status, StatusCode::NOT_FOUND);

    let again = app
        .request(
            "DELETE",
            &format!("/api/admin/donors/{d_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
