//! Dashboard views for both sides of the marketplace.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use workbee_core::Role;
use workbee_dispatch::{BusinessDashboard, WorkerDashboard};

use crate::AppState;
use crate::error::ApiError;
use crate::session::CurrentSession;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/business", get(business_dashboard))
        .route("/worker", get(worker_dashboard))
}

async fn business_dashboard(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<BusinessDashboard>, ApiError> {
    let business = session.require(Role::Business)?.user.id.as_business();
    let jobs = state.engine.jobs_for_business(business);
    Ok(Json(BusinessDashboard::project(
        business,
        &jobs,
        state.engine.free_bookings(),
        state.engine.bookings_used(business),
    )))
}

async fn worker_dashboard(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<WorkerDashboard>, ApiError> {
    let worker = session.require(Role::Worker)?.user.id.as_worker();
    let jobs = state.engine.snapshot();
    Ok(Json(WorkerDashboard::project(worker, &jobs)))
}
