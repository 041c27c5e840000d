//! Lawyer access, the request pool and claim/release.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use jsonwebtoken::{EncodingKey, Header};

use jurist_auth::UserType;
use jurist_entity::lawyer::LawyerStatus;

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/lawyer/profile", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = TestApp::new().await;
    let (_, _) = app.create_lawyer(LawyerStatus::Approved).await;

    let claims = serde_json::json!({
        "sub": "lawyer-sub-1",
        "email": "lawyer1@mail.kz",
        "aud": "authenticated",
        "exp": chrono::Utc::now().timestamp() - 3600,
        "user_metadata": { "user_type": "lawyer" },
    });
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(app.config.auth.jwt_secret.as_bytes()),
    )
    .unwrap();

    let response = app
        .request("GET", "/api/lawyer/profile", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_subject_is_unauthorized() {
    let app = TestApp::new().await;
    let token = app.token("nobody", "nobody@mail.kz", Some(UserType::Lawyer));

    let response = app
        .request("GET", "/api/lawyer/profile", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_read_and_update() {
    let app = TestApp::new().await;
    let (profile, token) = app.create_lawyer(LawyerStatus::Pending).await;

    let response = app
        .request("GET", "/api/lawyer/profile", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], profile.id.to_string());
    assert_eq!(response.body["data"]["status"], "PENDING");
    // The resolver synced the confirmed e-mail.
    assert_eq!(response.body["data"]["emailVerified"], true);

    let updated = app
        .request(
            "PATCH",
            "/api/lawyer/profile",
            Some(serde_json::json!({ "phone": "+7 (707) 000-11-22" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["phone"], "+77070001122");
}

#[tokio::test]
async fn test_pending_lawyer_cannot_browse_the_pool() {
    let app = TestApp::new().await;
    let (_, token) = app.create_lawyer(LawyerStatus::Pending).await;
    app.submit_request().await;

    let response = app
        .request("GET", "/api/lawyer/requests", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_pool_hides_contact_details() {
    let app = TestApp::new().await;
    let (_, token) = app.create_lawyer(LawyerStatus::Approved).await;
    let request_id = app.submit_request().await;

    let response = app
        .request("GET", "/api/lawyer/requests", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], request_id.as_str());
    assert!(items[0].get("phone").is_none());
    assert!(items[0].get("contactName").is_none());

    let forbidden = app
        .request("GET", "/api/lawyer/requests?status=SPAM", None, Some(&token))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_concurrent_claims_have_one_winner() {
    let app = TestApp::new().await;
    let request_id = app.submit_request().await;

    let mut tokens = Vec::new();
    for _ in 0..5 {
        tokens.push(app.create_lawyer(LawyerStatus::Approved).await.1);
    }

    let uri = format!("/api/lawyer/requests/{request_id}/take");
    let attempts = tokens.iter().map(|token| {
        let request = Request::builder()
            .method("POST")
            .uri(&uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        helpers::send(app.router.clone(), request)
    });
    let responses = futures::future::join_all(attempts).await;

    let won = responses.iter().filter(|r| r.status == StatusCode::OK).count();
    let lost = responses
        .iter()
        .filter(|r| r.status == StatusCode::CONFLICT)
        .count();
    assert_eq!(won, 1);
    assert_eq!(lost, 4);
}

#[tokio::test]
async fn test_take_then_release() {
    let app = TestApp::new().await;
    let (owner, owner_token) = app.create_lawyer(LawyerStatus::Approved).await;
    let (_, other_token) = app.create_lawyer(LawyerStatus::Approved).await;
    let request_id = app.submit_request().await;

    let taken = app
        .request(
            "POST",
            &format!("/api/lawyer/requests/{request_id}/take"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(taken.status, StatusCode::OK);
    assert_eq!(taken.body["data"]["status"], "IN_PROGRESS");
    assert_eq!(taken.body["data"]["assignedLawyerId"], owner.id.to_string());
    // The assignee sees the contact details.
    assert_eq!(taken.body["data"]["phone"], "+77011234567");

    let mine = app
        .request("GET", "/api/lawyer/my-requests", None, Some(&owner_token))
        .await;
    assert_eq!(mine.body["data"]["items"].as_array().map(Vec::len), Some(1));

    let stolen = app
        .request(
            "POST",
            &format!("/api/lawyer/requests/{request_id}/release"),
            None,
            Some(&other_token),
        )
        .await;
    assert_eq!(stolen.status, StatusCode::FORBIDDEN);

    let released = app
        .request(
            "POST",
            &format!("/api/lawyer/requests/{request_id}/release"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(released.status, StatusCode::OK);
    assert_eq!(released.body["data"]["status"], "NEW");
    assert!(released.body["data"]["assignedLawyerId"].is_null());

    let mine = app
        .request("GET", "/api/lawyer/my-requests", None, Some(&owner_token))
        .await;
    assert_eq!(mine.body["data"]["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_malformed_request_id_is_a_validation_error() {
    let app = TestApp::new().await;
    let (_, token) = app.create_lawyer(LawyerStatus::Approved).await;

    let response = app
        .request("GET", "/api/lawyer/requests/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
