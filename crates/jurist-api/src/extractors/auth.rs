//! Bearer-token extractors: the token is verified and resolved once per
//! request, then narrowed to the caller kind a handler needs.

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use jurist_auth::{Identity, Principal};
use jurist_core::error::AppError;
use jurist_core::types::{AdminId, LawyerId};

use crate::error::ApiError;
use crate::state::AppState;

/// Pulls the bearer token from the `Authorization` header.
async fn bearer_token(parts: &mut Parts) -> Result<String, ApiError> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| AppError::authentication("Missing or malformed Authorization header"))?;
    Ok(bearer.token().to_string())
}

/// Any resolved caller.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(Self(principal.clone()));
        }

        let token = bearer_token(parts).await?;
        let principal = state.resolver.resolve(&token).await?;
        parts.extensions.insert(principal.clone());
        Ok(Self(principal))
    }
}

/// A caller with a lawyer profile, in any moderation status.
#[derive(Debug, Clone, Copy)]
pub struct LawyerCaller(pub LawyerId);

impl FromRequestParts<AppState> for LawyerCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentPrincipal(principal) = CurrentPrincipal::from_request_parts(parts, state).await?;
        Ok(Self(principal.require_lawyer()?))
    }
}

/// An active administrator.
#[derive(Debug, Clone, Copy)]
pub struct AdminCaller(pub AdminId);

impl FromRequestParts<AppState> for AdminCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentPrincipal(principal) = CurrentPrincipal::from_request_parts(parts, state).await?;
        Ok(Self(principal.require_admin()?))
    }
}

/// A verified identity-provider account, with or without a profile.
/// Only registration accepts this.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity(pub Identity);

impl FromRequestParts<AppState> for VerifiedIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).await?;
        Ok(Self(state.resolver.identity(&token)?))
    }
}
