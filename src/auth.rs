use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    models::SessionContext,
};

/// Header carrying the caller's role when the local bypass is active.
pub const LOCAL_ROLE_HEADER: &str = "x-user-role";

/// Claims
///
/// Payload of the session token issued by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id.
    pub sub: Uuid,
    /// The user's role as assigned by user management (`admin`, `supervisor`, ...).
    #[serde(default)]
    pub role: String,
    /// Expiration time; expired tokens are rejected.
    pub exp: usize,
    /// Issued at.
    pub iat: usize,
}

/// AuthUser
///
/// The resolved identity of an authenticated request. Using it as a handler
/// argument makes the route reject unauthenticated callers with 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: String,
}

impl AuthUser {
    pub fn session(&self) -> SessionContext {
        SessionContext::authenticated(Some(self.role.clone()))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        authenticate(parts, &config)
    }
}

/// Session
///
/// The caller's session for routes that serve anonymous and authenticated
/// callers alike. Never rejects: a missing or invalid token yields an
/// anonymous session.
#[derive(Debug, Clone)]
pub struct Session(pub SessionContext);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        let session = match authenticate(parts, &config) {
            Ok(user) => user.session(),
            Err(_) => SessionContext::anonymous(),
        };
        Ok(Session(session))
    }
}

/// authenticate
///
/// 1. Local bypass: in `Env::Local`, an `x-user-role` header is trusted as is.
/// 2. Bearer token: decoded and validated (signature and expiry) with the
///    configured secret; the role is read from the token claims.
fn authenticate(parts: &Parts, config: &AppConfig) -> Result<AuthUser, StatusCode> {
    if config.env == Env::Local {
        if let Some(role) = parts
            .headers
            .get(LOCAL_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            tracing::debug!(role, "local role header accepted");
            return Ok(AuthUser {
                id: Uuid::nil(),
                role: role.to_string(),
            });
        }
    }

    let token = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => tracing::debug!("session token expired"),
            other => tracing::debug!(error = ?other, "session token rejected"),
        }
        StatusCode::UNAUTHORIZED
    })?;

    Ok(AuthUser {
        id: token_data.claims.sub,
        role: token_data.claims.role,
    })
}
