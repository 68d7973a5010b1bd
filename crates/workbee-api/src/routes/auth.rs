//! Account and session routes.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use workbee_core::{Credentials, Role, Session, SessionToken, User};

use crate::AppState;
use crate::error::ApiError;
use crate::session::{CurrentSession, SESSION_COOKIE, load_session};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/signout", post(sign_out))
        .route("/session", get(current_session))
}

#[derive(Debug, Deserialize)]
struct AuthRequest {
    #[serde(flatten)]
    credentials: Credentials,
    role: Role,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    token: SessionToken,
    user: User,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user: session.user,
        }
    }
}

async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<AuthRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.identity.sign_up(&req.credentials, req.role).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<AuthRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    let session = state.identity.sign_in(&req.credentials, req.role).await?;

    let cookie = Cookie::build((SESSION_COOKIE, session.token.to_string()))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::days(7))
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Json(session.into())))
}

async fn sign_out(
    State(state): State<AppState>,
    jar: CookieJar,
    CurrentSession(session): CurrentSession,
) -> Result<(CookieJar, StatusCode), ApiError> {
    state.identity.sign_out(&session.token).await?;
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, StatusCode::NO_CONTENT))
}

#[derive(Debug, Serialize)]
struct CurrentSessionResponse {
    user: Option<User>,
}

/// Signed-in user, or `null` when there is no live session.
async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CurrentSessionResponse>, ApiError> {
    let user = load_session(&state, &headers).await?.map(|s| s.user);
    Ok(Json(CurrentSessionResponse { user }))
}
