//! Job lifecycle endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use workbee_core::{JobDraft, JobId, JobRecord, JobStatus, Role, Session};
use workbee_dispatch::{Dispatcher, MatchState};

use crate::AppState;
use crate::error::ApiError;
use crate::session::CurrentSession;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_job))
        .route("/{id}", get(get_job))
        .route("/{id}/match", get(match_status))
        .route("/{id}/confirm", post(confirm_match))
        .route("/{id}/reject", post(reject_match))
        .route("/{id}/decline", post(decline_match))
        .route("/{id}/complete", post(complete_job))
        .route("/{id}/cancel", post(cancel_job))
}

/// Load a job owned by the calling business.
///
/// Jobs of other businesses look the same as missing ones.
fn owned_job(state: &AppState, session: &CurrentSession, id: JobId) -> Result<JobRecord, ApiError> {
    let session = session.require(Role::Business)?;
    let job = state.engine.get(id)?;
    if job.business_id != session.user.id.as_business() {
        return Err(ApiError::NotFound(format!("not found: job {}", id)));
    }
    Ok(job)
}

/// Load a job the calling worker is matched or booked on.
fn assigned_job(state: &AppState, session: &CurrentSession, id: JobId) -> Result<JobRecord, ApiError> {
    let session = session.require(Role::Worker)?;
    let job = state.engine.get(id)?;
    if job.matched_worker_id() != Some(session.user.id.as_worker()) {
        return Err(ApiError::NotFound(format!("not found: job {}", id)));
    }
    Ok(job)
}

fn can_view(session: &Session, job: &JobRecord) -> bool {
    match session.role() {
        Role::Business => job.business_id == session.user.id.as_business(),
        Role::Worker => job.matched_worker_id() == Some(session.user.id.as_worker()),
    }
}

async fn create_job(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(draft): Json<JobDraft>,
) -> Result<(StatusCode, Json<JobRecord>), ApiError> {
    let session = session.require(Role::Business)?;
    let job = state
        .engine
        .create_job(session.user.id.as_business(), draft)?;
    Ok((StatusCode::CREATED, Json(job)))
}

async fn get_job(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<JobId>,
) -> Result<Json<JobRecord>, ApiError> {
    let job = state.engine.get(id)?;
    if !can_view(&session, &job) {
        return Err(ApiError::NotFound(format!("not found: job {}", id)));
    }
    Ok(Json(job))
}

#[derive(Debug, Serialize)]
struct MatchStatusResponse {
    job_id: JobId,
    status: JobStatus,
    /// `None` once the dispatcher has nothing to report for the job.
    matching: Option<MatchState>,
}

async fn match_status(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<JobId>,
) -> Result<Json<MatchStatusResponse>, ApiError> {
    let job = owned_job(&state, &session, id)?;
    Ok(Json(MatchStatusResponse {
        job_id: job.id,
        status: job.status,
        matching: state.simulator.state(id),
    }))
}

async fn confirm_match(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<JobId>,
) -> Result<Json<JobRecord>, ApiError> {
    owned_job(&state, &session, id)?;
    Ok(Json(state.engine.confirm_match(id)?))
}

async fn reject_match(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<JobId>,
) -> Result<Json<JobRecord>, ApiError> {
    owned_job(&state, &session, id)?;
    Ok(Json(state.engine.reject_match(id)?))
}

/// The matched worker turns the offer down; the job goes back to searching.
async fn decline_match(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<JobId>,
) -> Result<Json<JobRecord>, ApiError> {
    assigned_job(&state, &session, id)?;
    Ok(Json(state.engine.reject_match(id)?))
}

/// Either the owning business or the booked worker can finish a job.
async fn complete_job(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<JobId>,
) -> Result<Json<JobRecord>, ApiError> {
    match session.0.role() {
        Role::Business => owned_job(&state, &session, id)?,
        Role::Worker => assigned_job(&state, &session, id)?,
    };
    Ok(Json(state.engine.complete_job(id)?))
}

async fn cancel_job(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<JobId>,
) -> Result<Json<JobRecord>, ApiError> {
    owned_job(&state, &session, id)?;
    Ok(Json(state.engine.cancel_job(id)?))
}
