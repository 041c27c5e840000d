//! Route definitions for the Jurist HTTP API.
//!
//! All routes are organized by caller and mounted under `/api`. Stored
//! documents are served under `/files` unless disabled.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(public_routes())
        .merge(lawyer_routes())
        .merge(admin_routes());

    let mut router = Router::new().nest("/api", api_routes);
    if state.config.storage.serve_documents {
        router = router.nest_service(
            "/files",
            ServeDir::new(&state.config.storage.local_root),
        );
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Health, anonymous intake and registration
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/requests", post(handlers::requests::submit_request))
        .route("/auth/register", post(handlers::auth::register))
}

/// Lawyer self-service and the marketplace
fn lawyer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/lawyer/profile",
            get(handlers::lawyer::get_profile).patch(handlers::lawyer::update_profile),
        )
        .route("/lawyer/documents", post(handlers::lawyer::resubmit_documents))
        .route("/lawyer/requests", get(handlers::lawyer::list_available))
        .route("/lawyer/requests/{id}", get(handlers::lawyer::get_request))
        .route("/lawyer/requests/{id}/take", post(handlers::lawyer::take_request))
        .route(
            "/lawyer/requests/{id}/release",
            post(handlers::lawyer::release_request),
        )
        .route("/lawyer/my-requests", get(handlers::lawyer::my_requests))
}

/// Administrator dashboard, moderation, request management and audit
fn admin_routes() -> Router<AppState> {
    use handlers::admin;

    Router::new()
        .route("/admin/stats", get(admin::stats::dashboard))
        .route("/admin/lawyers", get(admin::lawyers::list_lawyers))
        .route("/admin/lawyers/{id}", get(admin::lawyers::get_lawyer))
        .route(
            "/admin/lawyers/{id}/approve",
            patch(admin::lawyers::approve_lawyer),
        )
        .route(
            "/admin/lawyers/{id}/reject",
            patch(admin::lawyers::reject_lawyer),
        )
        .route("/admin/requests", get(admin::requests::list_requests))
        .route(
            "/admin/requests/{id}",
            get(admin::requests::get_request)
                .patch(admin::requests::update_status)
                .delete(admin::requests::delete_request),
        )
        .route("/admin/audit", get(admin::audit::list_audit))
}
