//! Integration tests for the request lifecycle engine, availability
//! gating, and rating aggregation.

mod common;

use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn test_self_request_is_invalid_target() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (id, token) = app
        .signup_donor("Alice", "alice@lifecycle.test", "+15551000001")
        .await;

    let body = serde_json::json!({ "donorId": id });
    let response = app
        .request("POST", "/api/donor/request", Some(body), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_TARGET");
}

#[tokio::test]
async fn test_reject_then_cancel_hits_terminal_state() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_r_id, r_token) = app
        .signup_donor("Requester", "req@lifecycle.test", "+15551000002")
        .await;
    let (d_id, d_token) = app
        .signup_donor("Donor", "don@lifecycle.test", "+15551000003")
        .await;

    // R sends a request to D
    let body = serde_json::json!({ "donorId": d_id });
    let created = app
        .request("POST", "/api/donor/request", Some(body), Some(&r_token))
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    assert_eq!(created.body["status"], "pending");
    let request_id = created.body["id"].as_str().unwrap().to_string();

    // D rejects with a note
    let body = serde_json::json!({ "note": "busy" });
    let rejected = app
        .request(
            "PATCH",
            &format!("/api/donor/requests/{request_id}/reject"),
            Some(body),
            Some(&d_token),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.body["status"], "rejected");
    assert_eq!(rejected.body["note"], "busy");

    // A later cancel by R on the same request is refused
    let cancelled = app
        .request(
            "PATCH",
            &format!("/api/donor/requests/{request_id}/cancel"),
            None,
            Some(&r_token),
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::CONFLICT);
    assert_eq!(cancelled.body["error"], "INVALID_STATE");
}

#[tokio::test]
async fn test_only_the_donor_may_reject() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_r_id, r_token) = app
        .signup_donor("Requester", "req2@lifecycle.test", "+15551000004")
        .await;
    let (d_id, _d_token) = app
        .signup_donor("Donor", "don2@lifecycle.test", "+15551000005")
        .await;

    let body = serde_json::json!({ "donorId": d_id });
    let created = app
        .request("POST", "/api/donor/request", Some(body), Some(&r_token))
        .await;
    let request_id = created.body["id"].as_str().unwrap().to_string();

    // The requester is not the donor party; reject must be forbidden
    let response = app
        .request(
            "PATCH",
            &format!("/api/donor/requests/{request_id}/reject"),
            None,
            Some(&r_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rating_bounds_are_enforced() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_r_id, r_token) = app
        .signup_donor("Requester", "req3@lifecycle.test", "+15551000006")
        .await;
    let (d_id, _d_token) = app
        .signup_donor("Donor", "don3@lifecycle.test", "+15551000007")
        .await;

    let body = serde_json::json!({ "donorId": d_id });
    let created = app
        .request("POST", "/api/donor/request", Some(body), Some(&r_token))
        .await;
    let request_id = created.body["id"].as_str().unwrap().to_string();

    for bad_rating in [0, 6] {
        let body = serde_json::json!({ "rating": bad_rating });
        let response = app
            .request(
                "PATCH",
                &format!("/api/donor/requests/{request_id}/complete"),
                Some(body),
                Some(&r_token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "rating {bad_rating}");
        assert_eq!(response.body["error"], "INVALID_RATING");
    }

    // The request is still pending after the refused attempts
    let body = serde_json::json!({ "rating": 5 });
    let response = app
        .request(
            "PATCH",
            &format!("/api/donor/requests/{request_id}/complete"),
            Some(body),
            Some(&r_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "completed");
    assert_eq!(response.body["rating"], 5);
}

#[tokio::test]
async fn test_completion_updates_aggregate_and_gates_the_donor() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_r_id, r_token) = app
        .signup_donor("Requester", "req4@lifecycle.test", "+15551000008")
        .await;
    let (d_id, d_token) = app
        .signup_donor("Donor", "don4@lifecycle.test", "+15551000009")
        .await;

    // Seed a prior aggregate of (avg 5.0, count 1)
    sqlx::query("UPDATE donors SET rating_sum = 5, rating_count = 1 WHERE id = $1")
        .bind(d_id)
        .execute(&app.db_pool)
        .await
        .unwrap();

    // The donor is visible in search before the donation
    let search = app
        .request(
            "GET",
            "/api/donor/search?location=Springfield&bloodGroup=O%2B",
            None,
            Some(&r_token),
        )
        .await;
    assert_eq!(search.status, StatusCode::OK);
    assert_eq!(search.body.as_array().unwrap().len(), 1);

    let body = serde_json::json!({ "donorId": d_id });
    let created = app
        .request("POST", "/api/donor/request", Some(body), Some(&r_token))
        .await;
    let request_id = created.body["id"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "rating": 4 });
    let completed = app
        .request(
            "PATCH",
            &format!("/api/donor/requests/{request_id}/complete"),
            Some(body),
            Some(&r_token),
        )
        .await;
    assert_eq!(completed.status, StatusCode::OK);

    // (5*1 + 4) / 2 = 4.5
    let profile = app
        .request("GET", "/api/donor/profile", None, Some(&d_token))
        .await;
    assert_eq!(profile.body["avgRating"], 4.5);
    assert_eq!(profile.body["ratingCount"], 2);
    assert!(profile.body["nextAvailableAt"].is_string());

    // The donor is now inside the cooldown window: hidden from search
    // and refusing new requests
    let search = app
        .request(
            "GET",
            "/api/donor/search?location=Springfield",
            None,
            Some(&r_token),
        )
        .await;
    assert_eq!(search.body.as_array().unwrap().len(), 0);

    let body = serde_json::json!({ "donorId": d_id });
    let refused = app
        .request("POST", "/api/donor/request", Some(body), Some(&r_token))
        .await;
    assert_eq!(refused.status, StatusCode::CONFLICT);
    assert_eq!(refused.body["error"], "DONOR_UNAVAILABLE");

    // History shows the completed donation for both parties
    let history = app
        .request("GET", "/api/donor/history", None, Some(&d_token))
        .await;
    assert_eq!(history.status, StatusCode::OK);
    assert_eq!(history.body["items"].as_array().unwrap().len(), 1);
    assert_eq!(history.body["items"][0]["status"], "completed");
}

#[tokio::test]
async fn test_concurrent_reject_and_cancel_has_one_winner() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_r_id, r_token) = app
        .signup_donor("Requester", "req5@lifecycle.test", "+15551000010")
        .await;
    let (d_id, d_token) = app
        .signup_donor("Donor", "don5@lifecycle.test", "+15551000011")
        .await;

    let body = serde_json::json!({ "donorId": d_id });
    let created = app
        .request("POST", "/api/donor/request", Some(body), Some(&r_token))
        .await;
    let request_id = created.body["id"].as_str().unwrap().to_string();

    let reject_path = format!("/api/donor/requests/{request_id}/reject");
    let cancel_path = format!("/api/donor/requests/{request_id}/cancel");
    let reject = app.request(
        "PATCH",
        &reject_path,
        None,
        Some(&d_token),
    );
    let cancel = app.request(
        "PATCH",
        &cancel_path,
        None,
        Some(&r_token),
    );

    let (reject_resp, cancel_resp) = tokio::join!(reject, cancel);

    let outcomes = [reject_resp.status, cancel_resp.status];
    let winners = outcomes.iter().filter(|s| **s == StatusCode::OK).count();
    let losers = outcomes
        .iter()
        .filter(|s| **s == StatusCode::CONFLICT)
        .count();
    assert_eq!(winners, 1, "exactly one transition must win: {outcomes:?}");
    assert_eq!(losers, 1, "the losing transition must see INVALID_STATE");

    // The stored state matches whichever call won
    let listed = app
        .request("GET", "/api/donor/requests?type=sent", None, Some(&r_token))
        .await;
    let status = listed.body["items"][0]["status"].as_str().unwrap();
    assert!(status == "rejected" || status == "cancelled");
}

#[tokio::test]
async fn test_list_requests_by_direction() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (_r_id, r_token) = app
        .signup_donor("Requester", "req6@lifecycle.test", "+15551000012")
        .await;
    let (d_id, d_token) = app
        .signup_donor("Donor", "don6@lifecycle.test", "+15551000013")
        .await;

    let body = serde_json::json!({ "donorId": d_id, "note": "urgent" });
    let created = app
        .request("POST", "/api/donor/request", Some(body), Some(&r_token))
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["note"], "urgent");

    let sent = app
        .request("GET", "/api/donor/requests?type=sent", None, Some(&r_token))
        .await;
    assert_eq!(sent.body["items"].as_array().unwrap().len(), 1);

    let received = app
        .request(
            "GET",
            "/api/donor/requests?type=received",
            None,
            Some(&d_token),
        )
        .await;
    assert_eq!(received.body["items"].as_array().unwrap().len(), 1);

    let none_sent = app
        .request("GET", "/api/donor/requests?type=sent", None, Some(&d_token))
        .await;
    assert_eq!(none_sent.body["items"].as_array().unwrap().len(), 0);
}
