//! Session extraction from requests.
//!
//! A session token is read from an `Authorization: Bearer` header, falling
//! back to the session cookie set at sign-in.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use axum_extra::extract::CookieJar;
use workbee_core::{Role, Session, SessionToken};

use crate::AppState;
use crate::error::ApiError;

/// Cookie holding the session token.
pub const SESSION_COOKIE: &str = "workbee_session";

/// Token presented with the request, if any.
pub fn request_token(headers: &HeaderMap) -> Option<SessionToken> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| SessionToken::from(t.to_string()));

    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|c| SessionToken::from(c.value().to_string()))
    })
}

/// Load the live session for the request, if any.
pub async fn load_session(state: &AppState, headers: &HeaderMap) -> Result<Option<Session>, ApiError> {
    let Some(token) = request_token(headers) else {
        return Ok(None);
    };
    Ok(state.identity.get_session(&token).await?)
}

/// The signed-in caller. Rejects with 401 when there is no live session.
pub struct CurrentSession(pub Session);

impl CurrentSession {
    /// Fail with 403 unless the caller has `role`.
    pub fn require(&self, role: Role) -> Result<&Session, ApiError> {
        self.0.require_role(role)?;
        Ok(&self.0)
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        load_session(state, &parts.headers)
            .await?
            .map(CurrentSession)
            .ok_or_else(|| ApiError::Unauthorized("sign in required".to_string()))
    }
}
