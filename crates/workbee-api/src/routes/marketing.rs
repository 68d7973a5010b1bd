//! Public forms: waitlist signup and contact messages.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;
use workbee_core::Ack;
use workbee_core::records::{ContactMessage, WaitlistSignup};
use workbee_core::store::insert_record;

use crate::AppState;
use crate::error::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/waitlist", post(join_waitlist))
        .route("/contact", post(send_contact))
}

async fn join_waitlist(
    State(state): State<AppState>,
    Json(mut signup): Json<WaitlistSignup>,
) -> Result<(StatusCode, Json<Ack>), ApiError> {
    signup.email = signup.email.trim().to_lowercase();
    let ack = insert_record(state.records.as_ref(), &signup).await?;
    info!(source = %signup.source, "Waitlist signup");
    Ok((StatusCode::CREATED, Json(ack)))
}

async fn send_contact(
    State(state): State<AppState>,
    Json(message): Json<ContactMessage>,
) -> Result<(StatusCode, Json<Ack>), ApiError> {
    let ack = insert_record(state.records.as_ref(), &message).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}
