//! Administrator moderation, request management, stats and audit.

use axum::http::StatusCode;

use jurist_entity::audit::{actions, targets};
use jurist_entity::lawyer::LawyerStatus;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_lawyer_token_cannot_reach_admin_routes() {
    let app = TestApp::new().await;
    let (_, token) = app.create_lawyer(LawyerStatus::Approved).await;

    let response = app.request("GET", "/api/admin/stats", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_approve_pending_lawyer() {
    let app = TestApp::new().await;
    let (admin, token) = app.create_admin().await;
    let (lawyer, _) = app.create_lawyer(LawyerStatus::Pending).await;
    let uri = format!("/api/admin/lawyers/{}/approve", lawyer.id);

    let response = app.request("PATCH", &uri, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "APPROVED");

    // Approving again changes nothing.
    let again = app.request("PATCH", &uri, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::OK);

    let entries = app.audits.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, actions::APPROVE_LAWYER);
    assert_eq!(entries[0].target_type, targets::LAWYER_PROFILE);
    assert_eq!(entries[0].actor_id, admin.id.into_uuid());
    assert_eq!(entries[0].ip_address.as_deref(), Some("10.0.0.1"));

    let kinds = app.notification_kinds().await;
    assert_eq!(kinds, vec!["lawyer_approved".to_string()]);
}

#[tokio::test]
async fn test_reject_needs_a_real_reason() {
    let app = TestApp::new().await;
    let (_, token) = app.create_admin().await;
    let (lawyer, _) = app.create_lawyer(LawyerStatus::Pending).await;
    let uri = format!("/api/admin/lawyers/{}/reject", lawyer.id);

    let short = app
        .request(
            "PATCH",
            &uri,
            Some(serde_json::json!({ "reason": "123456789" })),
            Some(&token),
        )
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let rejected = app
        .request(
            "PATCH",
            &uri,
            Some(serde_json::json!({ "reason": "1234567890" })),
            Some(&token),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.body["data"]["status"], "REJECTED");
    assert_eq!(rejected.body["data"]["rejectionReason"], "1234567890");

    let jobs = app.jobs.all().await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].payload["kind"], "lawyer_rejected");
    assert_eq!(jobs[0].payload["reason"], "1234567890");
}

#[tokio::test]
async fn test_reject_reason_keeps_leading_whitespace() {
    let app = TestApp::new().await;
    let (_, token) = app.create_admin().await;
    let (lawyer, _) = app.create_lawyer(LawyerStatus::Pending).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/lawyers/{}/reject", lawyer.id),
            Some(serde_json::json!({ "reason": " 123456789" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "REJECTED");
    assert_eq!(response.body["data"]["rejectionReason"], " 123456789");
}

#[tokio::test]
async fn test_unknown_lawyer_is_not_found() {
    let app = TestApp::new().await;
    let (_, token) = app.create_admin().await;

    let response = app
        .request(
            "GET",
            &format!("/api/admin/lawyers/{}", uuid_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lawyer_list_filters_by_status() {
    let app = TestApp::new().await;
    let (_, token) = app.create_admin().await;
    app.create_lawyer(LawyerStatus::Pending).await;
    app.create_lawyer(LawyerStatus::Approved).await;
    app.create_lawyer(LawyerStatus::Approved).await;

    let response = app
        .request("GET", "/api/admin/lawyers?status=APPROVED", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 2);
}

#[tokio::test]
async fn test_spam_request_leaves_the_pool() {
    let app = TestApp::new().await;
    let (_, admin_token) = app.create_admin().await;
    let (_, lawyer_token) = app.create_lawyer(LawyerStatus::Approved).await;
    let request_id = app.submit_request().await;

    let marked = app
        .request(
            "PATCH",
            &format!("/api/admin/requests/{request_id}"),
            Some(serde_json::json!({ "status": "SPAM" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(marked.status, StatusCode::OK);
    assert_eq!(marked.body["data"]["status"], "SPAM");

    let pool = app
        .request("GET", "/api/lawyer/requests", None, Some(&lawyer_token))
        .await;
    assert_eq!(pool.body["data"]["items"].as_array().map(Vec::len), Some(0));

    let detail = app
        .request(
            "GET",
            &format!("/api/lawyer/requests/{request_id}"),
            None,
            Some(&lawyer_token),
        )
        .await;
    assert_eq!(detail.status, StatusCode::FORBIDDEN);

    let entries = app.audits.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, actions::UPDATE_REQUEST_STATUS);
}

#[tokio::test]
async fn test_in_progress_without_assignee_is_rejected() {
    let app = TestApp::new().await;
    let (_, token) = app.create_admin().await;
    let request_id = app.submit_request().await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/requests/{request_id}"),
            Some(serde_json::json!({ "status": "IN_PROGRESS" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.audits.entries().await.is_empty());
}

#[tokio::test]
async fn test_delete_request_is_audited() {
    let app = TestApp::new().await;
    let (_, token) = app.create_admin().await;
    let request_id = app.submit_request().await;
    let uri = format!("/api/admin/requests/{request_id}");

    let deleted = app.request("DELETE", &uri, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.request("GET", &uri, None, Some(&token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let audit = app
        .request(
            "GET",
            "/api/admin/audit?action=delete_request",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(audit.status, StatusCode::OK);
    let items = audit.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["targetType"], targets::REQUEST);
    assert_eq!(items[0]["targetId"], request_id.as_str());
}

#[tokio::test]
async fn test_dashboard_stats() {
    let app = TestApp::new().await;
    let (_, token) = app.create_admin().await;
    app.create_lawyer(LawyerStatus::Pending).await;
    app.create_lawyer(LawyerStatus::Approved).await;
    app.submit_request().await;
    app.submit_request().await;

    let response = app.request("GET", "/api/admin/stats", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["requests"]["total"], 2);
    assert_eq!(data["requests"]["today"], 2);
    assert_eq!(data["requests"]["byStatus"]["NEW"], 2);
    assert_eq!(data["lawyers"]["total"], 2);
    assert_eq!(data["lawyers"]["pending"], 1);
}

fn uuid_v4() -> String {
    // Any well-formed UUID that was never stored.
    "3f1c9a4e-2b7d-4c1e-9f0a-6d5b8e7c2a10".to_string()
}
