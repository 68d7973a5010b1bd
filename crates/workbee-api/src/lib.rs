//! API server for WorkBee.
//!
//! Provides the HTTP REST API for accounts, onboarding forms, the job
//! lifecycle and dashboards.

pub mod error;
pub mod routes;
pub mod session;
pub mod state;

pub use state::AppState;
