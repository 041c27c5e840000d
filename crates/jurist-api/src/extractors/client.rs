//! Caller network metadata for rate limiting and the audit trail.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;

use jurist_service::ActorContext;

use crate::state::AppState;

/// Address and user agent of the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    /// Client IP, or `unknown`.
    pub ip: String,
    /// `User-Agent` header, if sent.
    pub user_agent: Option<String>,
}

impl ClientInfo {
    /// Audit metadata for an action taken by this client.
    pub fn actor_context(&self) -> ActorContext {
        ActorContext::new(Some(self.ip.clone()), self.user_agent.clone())
    }
}

/// The `X-Forwarded-For` entry written by the outermost trusted proxy.
///
/// Entries left of it are supplied by the client and ignored. A header with
/// fewer entries than `hops` did not pass through every proxy.
fn forwarded_client(header: &str, hops: usize) -> Option<String> {
    let entries: Vec<&str> = header.split(',').map(str::trim).collect();
    if hops == 0 || entries.len() < hops {
        return None;
    }
    Some(entries[entries.len() - hops])
        .filter(|v| !v.is_empty())
        .map(String::from)
}

impl FromRequestParts<AppState> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let server = &state.config.server;
        let forwarded = server
            .trust_forwarded_for
            .then(|| {
                parts
                    .headers
                    .get("x-forwarded-for")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| forwarded_client(v, server.trusted_proxy_hops))
            })
            .flatten();

        let ip = forwarded
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string());

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(Self { ip, user_agent })
    }
}
