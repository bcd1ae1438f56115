use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    models::{User, UserProfile},
    repository::RepositoryState,
};

/// Name of the cookie carrying the session JWT for browser navigation.
pub const SESSION_COOKIE: &str = "session";

/// Header accepted in `Env::Local` to impersonate an existing user.
pub const DEV_USER_HEADER: &str = "x-user-id";

/// Claims
///
/// Payload of a session JWT. Tokens are issued by the identity provider and only
/// verified here.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the user's UUID in the `users` table.
    pub sub: Uuid,
    /// Expiration Time (exp): validated on every request.
    pub exp: usize,
    /// Issued At (iat).
    pub iat: usize,
}

/// AuthUser
///
/// The resolved identity of a signed-in caller.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub email_verified: bool,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        let email_verified = user.is_verified();
        Self {
            id: user.id,
            email: user.email,
            email_verified,
        }
    }
}

impl From<&AuthUser> for UserProfile {
    fn from(user: &AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            email_verified: user.email_verified,
        }
    }
}

/// Session
///
/// Per-request session state that guards are evaluated against. Anonymous when
/// no credential resolved to a known user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<AuthUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: AuthUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }
}

/// Session Extractor Implementation
///
/// Resolution never rejects: a missing, malformed or expired credential simply
/// yields an anonymous session, and the route's guards decide what that means.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        let user = resolve_user(&parts.headers, &repo, &config).await;
        Ok(Session { user })
    }
}

/// resolve_user
///
/// Tries each credential in order:
/// 1. `x-user-id` header (only in `Env::Local`),
/// 2. `Authorization: Bearer <jwt>`,
/// 3. the `session` cookie.
///
/// The first credential that maps to an existing user wins.
pub async fn resolve_user(
    headers: &HeaderMap,
    repo: &RepositoryState,
    config: &AppConfig,
) -> Option<AuthUser> {
    if config.dev_bypass_enabled() {
        if let Some(user_id) = dev_user_id(headers) {
            if let Some(user) = repo.get_user(user_id).await {
                return Some(user.into());
            }
            tracing::debug!(%user_id, "dev bypass header names an unknown user");
        }
    }

    let candidates = [bearer_token(headers), session_cookie(headers)];
    for token in candidates.into_iter().flatten() {
        let claims = match decode_session_token(&token, &config.jwt_secret) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "rejected session token");
                continue;
            }
        };
        if let Some(user) = repo.get_user(claims.sub).await {
            return Some(user.into());
        }
    }

    None
}

/// Decodes and validates an HS256 session JWT, including its expiry.
pub fn decode_session_token(
    token: &str,
    secret: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(token, &decoding_key, &validation).map(|data| data.claims)
}

fn dev_user_id(headers: &HeaderMap) -> Option<Uuid> {
    let value = headers.get(DEV_USER_HEADER)?.to_str().ok()?;
    Uuid::parse_str(value).ok()
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// The raw session token from the `session` cookie, if the browser sent one.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}
