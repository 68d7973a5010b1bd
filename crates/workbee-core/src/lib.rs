//! Core domain types and traits for the WorkBee staffing platform.
//!
//! This crate contains:
//! - Typed identifiers for jobs, businesses, workers and user accounts
//! - The job record, its draft form and validation rules
//! - Worker profiles used for matching
//! - The identity provider and record store collaborator traits
//! - Typed records persisted through the record store (waitlist, contact, registrations)

pub mod error;
pub mod id;
pub mod identity;
pub mod job;
pub mod records;
pub mod store;
pub mod worker;

pub use error::{Error, Result};
pub use id::{BusinessId, JobId, UserId, WorkerId};
pub use identity::{Credentials, IdentityProvider, Role, Session, SessionToken, User};
pub use job::{JobDraft, JobRecord, JobStatus, PayType, Urgency, UrgencyKind, WorkerRef};
pub use store::{Ack, RecordStore};
pub use worker::WorkerProfile;
