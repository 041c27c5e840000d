//! Public intake: health, submission, throttling.

use axum::http::StatusCode;
use chrono::Duration;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_submission_gets_first_number_of_the_day() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/api/requests", Some(TestApp::submission(50)), None)
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["requestNumber"], "REQ-20250310-0001");
    assert_eq!(data["status"], "NEW");
    assert!(data["message"].as_str().is_some());

    let second = app
        .request("POST", "/api/requests", Some(TestApp::submission(60)), None)
        .await;
    assert_eq!(second.body["data"]["requestNumber"], "REQ-20250310-0002");

    let kinds = app.notification_kinds().await;
    assert!(kinds.contains(&"request_confirmation".to_string()));
    assert!(kinds.contains(&"new_request_for_admin".to_string()));
    // No approved lawyers yet.
    assert!(!kinds.contains(&"new_request_for_lawyers".to_string()));
}

#[tokio::test]
async fn test_short_description_is_rejected_with_field_details() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/api/requests", Some(TestApp::submission(49)), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["details"]["description"].is_array());
    assert!(app.jobs.all().await.is_empty());
}

#[tokio::test]
async fn test_eleventh_submission_within_the_hour_is_throttled() {
    let app = TestApp::new().await;

    for _ in 0..10 {
        let response = app
            .request_from("203.0.113.7", "POST", "/api/requests", Some(TestApp::submission(80)), None)
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        app.clock.advance(Duration::minutes(5));
    }

    let throttled = app
        .request_from("203.0.113.7", "POST", "/api/requests", Some(TestApp::submission(80)), None)
        .await;
    assert_eq!(throttled.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(throttled.body["error"], "RATE_LIMITED");

    let other_ip = app
        .request_from("203.0.113.8", "POST", "/api/requests", Some(TestApp::submission(80)), None)
        .await;
    assert_eq!(other_ip.status, StatusCode::CREATED);

    app.clock.advance(Duration::hours(2));
    let later = app
        .request_from("203.0.113.7", "POST", "/api/requests", Some(TestApp::submission(80)), None)
        .await;
    assert_eq!(later.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_spoofed_forwarded_entries_share_the_proxy_address() {
    let app = TestApp::new().await;

    let mut statuses = Vec::new();
    for i in 0..11 {
        let spoofed = format!("198.51.100.{i}, 203.0.113.7");
        let response = app
            .request_from(&spoofed, "POST", "/api/requests", Some(TestApp::submission(80)), None)
            .await;
        statuses.push(response.status);
    }

    assert!(statuses[..10].iter().all(|s| *s == StatusCode::CREATED));
    assert_eq!(statuses[10], StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_approved_lawyers_are_told_about_new_requests() {
    let app = TestApp::new().await;
    app.create_lawyer(jurist_entity::lawyer::LawyerStatus::Approved)
        .await;
    app.create_lawyer(jurist_entity::lawyer::LawyerStatus::Pending)
        .await;

    app.submit_request().await;

    let jobs = app.jobs.all().await;
    let fanout = jobs
        .iter()
        .find(|j| j.payload["kind"] == "new_request_for_lawyers")
        .expect("No lawyer fan-out queued");
    assert_eq!(fanout.payload["emails"].as_array().map(Vec::len), Some(1));
    assert_eq!(fanout.payload["budget_label"], "150 000 KZT");
}
