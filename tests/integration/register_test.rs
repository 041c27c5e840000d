//! Lawyer registration and document resubmission over multipart.

use axum::http::StatusCode;

use jurist_auth::UserType;
use jurist_database::store::LawyerStore;
use jurist_entity::lawyer::LawyerStatus;

use crate::helpers::{TestApp, VALID_IIN};

const PDF: &[u8] = b"%PDF-1.7 test document";

fn all_documents() -> Vec<(&'static str, &'static str, &'static [u8])> {
    vec![
        ("photo", "image/jpeg", b"\xFF\xD8\xFF jpeg".as_slice()),
        ("diploma", "application/pdf", PDF),
        ("license", "application/pdf", PDF),
    ]
}

fn stored_files(app: &TestApp) -> usize {
    ["photos", "diplomas", "licenses"]
        .iter()
        .map(|folder| {
            std::fs::read_dir(app.storage_dir.path().join(folder))
                .map(|entries| entries.count())
                .unwrap_or(0)
        })
        .sum()
}

#[tokio::test]
async fn test_stored_document_urls_resolve() {
    let app = TestApp::new().await;
    let token = app.token("files-sub", "files@mail.kz", Some(UserType::Lawyer));

    let response = app
        .multipart(
            "/api/auth/register",
            Some(&token),
            &[
                ("category", "ADVOCATE"),
                ("fullName", "Aruzhan Serikova"),
                ("iin", VALID_IIN),
                ("phone", "87015554433"),
            ],
            &all_documents(),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

    let base = app.config.storage.public_base_url.trim_end_matches("/files");
    for field in ["photoUrl", "diplomaUrl", "licenseUrl"] {
        let url = response.body["data"][field].as_str().unwrap();
        let path = url.strip_prefix(base).unwrap();
        assert!(path.starts_with("/files/"), "{url}");

        let fetched = app.request("GET", path, None, None).await;
        assert_eq!(fetched.status, StatusCode::OK, "{path}");
    }

    let missing = app.request("GET", "/files/photos/missing.jpg", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_creates_pending_profile() {
    let app = TestApp::new().await;
    let token = app.token("new-sub", "Aruzhan@Mail.kz", Some(UserType::Lawyer));

    let response = app
        .multipart(
            "/api/auth/register",
            Some(&token),
            &[
                ("category", "ADVOCATE"),
                ("fullName", "  Aruzhan Serikova "),
                ("iin", VALID_IIN),
                ("phone", "87015554433"),
            ],
            &all_documents(),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["status"], "PENDING");
    assert_eq!(data["email"], "aruzhan@mail.kz");
    assert_eq!(data["fullName"], "Aruzhan Serikova");
    assert_eq!(data["phone"], "+77015554433");
    assert_eq!(stored_files(&app), 3);

    let kinds = app.notification_kinds().await;
    assert_eq!(kinds, vec!["new_lawyer_for_admin".to_string()]);

    // Registering the same account twice conflicts.
    let again = app
        .multipart(
            "/api/auth/register",
            Some(&token),
            &[
                ("category", "ADVOCATE"),
                ("fullName", "Aruzhan Serikova"),
                ("iin", VALID_IIN),
                ("phone", "87015554433"),
            ],
            &all_documents(),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(stored_files(&app), 3);
}

#[tokio::test]
async fn test_register_rejects_bad_checksum() {
    let app = TestApp::new().await;
    let token = app.token("new-sub", "a@mail.kz", None);

    let response = app
        .multipart(
            "/api/auth/register",
            Some(&token),
            &[
                ("category", "CONSULTANT"),
                ("fullName", "Aruzhan Serikova"),
                ("iin", "900101300018"),
                ("phone", "87015554433"),
            ],
            &all_documents(),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["iin"].is_array());
    assert_eq!(stored_files(&app), 0);
}

#[tokio::test]
async fn test_register_rejects_unsupported_document_type() {
    let app = TestApp::new().await;
    let token = app.token("new-sub", "a@mail.kz", None);

    let response = app
        .multipart(
            "/api/auth/register",
            Some(&token),
            &[
                ("category", "ADVOCATE"),
                ("fullName", "Aruzhan Serikova"),
                ("iin", VALID_IIN),
                ("phone", "87015554433"),
            ],
            &[
                ("photo", "image/gif", b"GIF89a".as_slice()),
                ("diploma", "application/pdf", PDF),
                ("license", "application/pdf", PDF),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.lawyers.find_by_external_ref("new-sub").await.unwrap().is_none());
    assert_eq!(stored_files(&app), 0);
}

#[tokio::test]
async fn test_register_requires_identity() {
    let app = TestApp::new().await;
    let response = app
        .multipart("/api/auth/register", None, &[], &all_documents())
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_resubmission_returns_rejected_profile_to_moderation() {
    let app = TestApp::new().await;
    let (_, token) = app.create_lawyer(LawyerStatus::Rejected).await;

    let response = app
        .multipart(
            "/api/lawyer/documents",
            Some(&token),
            &[],
            &[("diploma", "application/pdf", PDF)],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["status"], "PENDING");
    assert!(data["rejectionReason"].is_null());
    assert!(data["diplomaUrl"].as_str().unwrap().contains("/diplomas/"));
    assert!(data["licenseUrl"].as_str().unwrap().starts_with("seed://"));
}

#[tokio::test]
async fn test_resubmission_keeps_approved_status() {
    let app = TestApp::new().await;
    let (_, token) = app.create_lawyer(LawyerStatus::Approved).await;

    let response = app
        .multipart(
            "/api/lawyer/documents",
            Some(&token),
            &[],
            &[("license", "application/pdf", PDF)],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "APPROVED");
}
