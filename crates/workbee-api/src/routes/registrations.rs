//! Onboarding forms completed after sign-up.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;
use workbee_core::records::{BusinessRegistration, WorkerRegistration};
use workbee_core::store::insert_record;
use workbee_core::{Ack, Role, WorkerProfile};

use crate::AppState;
use crate::error::ApiError;
use crate::session::CurrentSession;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/business", post(register_business))
        .route("/worker", post(register_worker))
}

async fn register_business(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(mut registration): Json<BusinessRegistration>,
) -> Result<(StatusCode, Json<Ack>), ApiError> {
    let session = session.require(Role::Business)?;
    registration.id = session.user.id;

    let ack = insert_record(state.records.as_ref(), &registration).await?;
    info!(user_id = %registration.id, company = %registration.company_name, "Business registered");
    Ok((StatusCode::CREATED, Json(ack)))
}

/// Store the worker's details and make them available for matching.
async fn register_worker(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(mut registration): Json<WorkerRegistration>,
) -> Result<(StatusCode, Json<Ack>), ApiError> {
    let session = session.require(Role::Worker)?;
    registration.id = session.user.id;

    let ack = insert_record(state.records.as_ref(), &registration).await?;

    // New workers start unrated.
    let profile = WorkerProfile {
        id: registration.id.as_worker(),
        name: registration.full_name.clone(),
        rating: 0.0,
        completed_jobs: 0,
        skills: registration
            .skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        phone: registration.phone.clone(),
    };
    state.simulator.enroll(profile)?;

    info!(user_id = %registration.id, "Worker registered");
    Ok((StatusCode::CREATED, Json(ack)))
}
