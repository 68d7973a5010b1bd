//! API routes.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod jobs;
pub mod marketing;
pub mod registrations;

use crate::AppState;
use axum::Router;

/// Build the main API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_router())
        .nest("/auth", auth::router())
        .merge(health::router())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .merge(marketing::router())
        .nest("/registrations", registrations::router())
        .nest("/jobs", jobs::router())
        .nest("/dashboard", dashboard::router())
}
