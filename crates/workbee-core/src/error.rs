//! Error types for WorkBee.

use thiserror::Error;

use crate::id::{JobId, WorkerId};
use crate::job::JobStatus;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input, surfaced to the submitting user for correction.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A transition was attempted from a state that does not allow it.
    #[error("cannot {operation} job {job} while it is {status}")]
    InvalidState {
        job: JobId,
        status: JobStatus,
        operation: &'static str,
    },

    /// The worker already holds a committed job.
    #[error("worker {worker} is already committed to job {job}")]
    WorkerBusy { worker: WorkerId, job: JobId },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("free bookings used up: {used} of {allowed}")]
    QuotaExceeded { used: u32, allowed: u32 },

    #[error("already registered: {0}")]
    AlreadyRegistered(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("duplicate key in {table}: {key}")]
    DuplicateKey { table: String, key: String },

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
