//! Lifecycle engine - the single authority over job state transitions.
//!
//! ```text
//! searching --(match found)-->        matched
//! matched   --(business confirms)-->  confirmed
//! matched   --(business rejects)-->   searching
//! confirmed --(work finished)-->      completed
//! searching|matched --(cancel)-->     declined
//! ```
//!
//! All mutations take the write lock for their whole check-and-set, so two
//! confirmations racing for the same worker are serialized and exactly one
//! wins. A failed operation never changes state. Re-running an operation on
//! a job that is already in the target state succeeds without doing anything.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use workbee_config::EngineConfig;
use workbee_core::{
    BusinessId, Error, JobDraft, JobId, JobRecord, JobStatus, Result, WorkerId, WorkerProfile,
};

use crate::invariant;

/// Capacity of the event channel before slow subscribers start lagging.
const EVENT_CAPACITY: usize = 256;

/// State change emitted after a transition commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    Created { job: JobId },
    Matched { job: JobId, worker: WorkerId },
    Confirmed { job: JobId, worker: WorkerId },
    /// The match was turned down by either side; the job is searching again.
    Rejected { job: JobId, worker: WorkerId },
    Completed { job: JobId, worker: WorkerId },
    Cancelled { job: JobId, worker: Option<WorkerId> },
}

impl JobEvent {
    pub fn job(&self) -> JobId {
        match self {
            JobEvent::Created { job }
            | JobEvent::Matched { job, .. }
            | JobEvent::Confirmed { job, .. }
            | JobEvent::Rejected { job, .. }
            | JobEvent::Completed { job, .. }
            | JobEvent::Cancelled { job, .. } => *job,
        }
    }
}

/// Outcome of evaluating a transition against the current record.
enum Step {
    /// Already in the target state.
    Unchanged,
    Apply(JobRecord, JobEvent),
}

#[derive(Debug, Default)]
struct JobBook {
    jobs: HashMap<JobId, JobRecord>,
    /// Worker -> the one job they are confirmed on.
    committed: HashMap<WorkerId, JobId>,
    /// Confirmed bookings per business, counted against the free quota.
    bookings_used: HashMap<BusinessId, u32>,
}

impl JobBook {
    fn get(&self, id: JobId) -> Result<&JobRecord> {
        self.jobs
            .get(&id)
            .ok_or_else(|| Error::NotFound(format!("job {}", id)))
    }

    /// Store a checked candidate and keep the indexes in step with it.
    fn commit(&mut self, candidate: JobRecord, event: &JobEvent) {
        if let Some(previous) = self.jobs.get(&candidate.id) {
            if previous.status == JobStatus::Confirmed {
                if let Some(worker) = previous.matched_worker_id() {
                    self.committed.remove(&worker);
                }
            }
        }
        if candidate.status == JobStatus::Confirmed {
            if let Some(worker) = candidate.matched_worker_id() {
                self.committed.insert(worker, candidate.id);
            }
        }
        if let JobEvent::Confirmed { .. } = event {
            *self.bookings_used.entry(candidate.business_id).or_default() += 1;
        }
        self.jobs.insert(candidate.id, candidate);
    }
}

/// Owns every job record and enforces the lifecycle rules.
pub struct LifecycleEngine {
    book: RwLock<JobBook>,
    events: broadcast::Sender<JobEvent>,
    free_bookings: Option<u32>,
}

impl Default for LifecycleEngine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl LifecycleEngine {
    /// Create an engine; `free_bookings` caps confirmed bookings per business.
    pub fn new(free_bookings: Option<u32>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            book: RwLock::new(JobBook::default()),
            events,
            free_bookings,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.free_bookings)
    }

    /// Receive every event committed from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.events.subscribe()
    }

    pub fn free_bookings(&self) -> Option<u32> {
        self.free_bookings
    }

    // A panic while holding the lock cannot leave a half-applied record:
    // candidates are built on a clone and committed in one step.
    fn read(&self) -> RwLockReadGuard<'_, JobBook> {
        self.book.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, JobBook> {
        self.book.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_quota(&self, book: &JobBook, business: BusinessId) -> Result<()> {
        if let Some(allowed) = self.free_bookings {
            let used = book.bookings_used.get(&business).copied().unwrap_or(0);
            if used >= allowed {
                info!(business_id = %business, used, allowed, "Free bookings used up");
                return Err(Error::QuotaExceeded { used, allowed });
            }
        }
        Ok(())
    }

    /// Validate a draft and record a new job in `searching`.
    pub fn create_job(&self, business: BusinessId, draft: JobDraft) -> Result<JobRecord> {
        let job = JobRecord::create(business, draft, Utc::now())?;

        let mut book = self.write();
        self.check_quota(&book, business)?;
        invariant::check_job(&job)?;
        let event = JobEvent::Created { job: job.id };
        book.commit(job.clone(), &event);
        drop(book);

        info!(job_id = %job.id, business_id = %business, title = %job.title, "Job created");
        self.publish(event);
        Ok(job)
    }

    /// Propose `worker` for a searching job.
    ///
    /// The worker is not checked for other commitments here; that happens
    /// when the business confirms.
    pub fn propose_match(&self, job: JobId, worker: &WorkerProfile) -> Result<JobRecord> {
        self.transition(job, "propose a match for", |_, current| match current.status {
            JobStatus::Searching => {
                let mut next = current.clone();
                next.status = JobStatus::Matched;
                next.matched_worker = Some(worker.to_ref());
                Ok(Step::Apply(
                    next,
                    JobEvent::Matched {
                        job,
                        worker: worker.id,
                    },
                ))
            }
            JobStatus::Matched if current.matched_worker_id() == Some(worker.id) => {
                Ok(Step::Unchanged)
            }
            _ => Err(invalid(current, "propose a match for")),
        })
    }

    /// Commit the matched worker to the job.
    ///
    /// Fails with `WorkerBusy` if the worker is already confirmed elsewhere,
    /// or `QuotaExceeded` once the business has no free bookings left. The
    /// job then stays `matched`.
    pub fn confirm_match(&self, job: JobId) -> Result<JobRecord> {
        self.transition(job, "confirm", |book, current| match current.status {
            JobStatus::Confirmed => Ok(Step::Unchanged),
            JobStatus::Matched => {
                let worker = matched_worker(current)?;
                self.check_quota(book, current.business_id)?;
                if let Some(&other) = book.committed.get(&worker) {
                    if other != job {
                        debug_assert_eq!(
                            invariant::committed_job(worker, book.jobs.values(), job),
                            Some(other)
                        );
                        info!(job_id = %job, worker_id = %worker, committed_to = %other, "Worker already committed");
                        return Err(Error::WorkerBusy { worker, job: other });
                    }
                }
                let mut next = current.clone();
                next.status = JobStatus::Confirmed;
                Ok(Step::Apply(next, JobEvent::Confirmed { job, worker }))
            }
            _ => Err(invalid(current, "confirm")),
        })
    }

    /// Turn down the proposed worker and go back to searching. Used both when
    /// the business rejects the match and when the worker declines it.
    pub fn reject_match(&self, job: JobId) -> Result<JobRecord> {
        self.transition(job, "reject the match for", |_, current| match current.status {
            JobStatus::Searching => Ok(Step::Unchanged),
            JobStatus::Matched => {
                let worker = matched_worker(current)?;
                let mut next = current.clone();
                next.status = JobStatus::Searching;
                next.matched_worker = None;
                Ok(Step::Apply(next, JobEvent::Rejected { job, worker }))
            }
            _ => Err(invalid(current, "reject the match for")),
        })
    }

    /// Mark confirmed work as finished, freeing the worker.
    pub fn complete_job(&self, job: JobId) -> Result<JobRecord> {
        self.transition(job, "complete", |_, current| match current.status {
            JobStatus::Completed => Ok(Step::Unchanged),
            JobStatus::Confirmed => {
                let worker = matched_worker(current)?;
                let mut next = current.clone();
                next.status = JobStatus::Completed;
                Ok(Step::Apply(next, JobEvent::Completed { job, worker }))
            }
            _ => Err(invalid(current, "complete")),
        })
    }

    /// Withdraw a job that has not been confirmed yet.
    pub fn cancel_job(&self, job: JobId) -> Result<JobRecord> {
        self.transition(job, "cancel", |_, current| match current.status {
            JobStatus::Declined => Ok(Step::Unchanged),
            JobStatus::Searching | JobStatus::Matched => {
                let worker = current.matched_worker_id();
                let mut next = current.clone();
                next.status = JobStatus::Declined;
                next.matched_worker = None;
                Ok(Step::Apply(next, JobEvent::Cancelled { job, worker }))
            }
            _ => Err(invalid(current, "cancel")),
        })
    }

    pub fn get(&self, job: JobId) -> Result<JobRecord> {
        self.read().get(job).cloned()
    }

    /// Copy of every job, oldest first.
    pub fn snapshot(&self) -> Vec<JobRecord> {
        let mut jobs: Vec<JobRecord> = self.read().jobs.values().cloned().collect();
        jobs.sort_by_key(|j| j.id);
        jobs
    }

    pub fn jobs_for_business(&self, business: BusinessId) -> Vec<JobRecord> {
        let mut jobs: Vec<JobRecord> = self
            .read()
            .jobs
            .values()
            .filter(|j| j.business_id == business)
            .cloned()
            .collect();
        jobs.sort_by_key(|j| j.id);
        jobs
    }

    pub fn bookings_used(&self, business: BusinessId) -> u32 {
        self.read()
            .bookings_used
            .get(&business)
            .copied()
            .unwrap_or(0)
    }

    /// Whether the worker is matched or confirmed on any job.
    pub fn is_worker_busy(&self, worker: WorkerId) -> bool {
        invariant::is_worker_busy(worker, self.read().jobs.values())
    }

    fn transition<F>(&self, id: JobId, operation: &'static str, decide: F) -> Result<JobRecord>
    where
        F: FnOnce(&JobBook, &JobRecord) -> Result<Step>,
    {
        let mut book = self.write();
        let current = book.get(id)?;

        let (mut next, event) = match decide(&*book, current) {
            Ok(Step::Unchanged) => {
                debug!(job_id = %id, status = %current.status, operation, "Transition already applied");
                return Ok(current.clone());
            }
            Ok(Step::Apply(next, event)) => (next, event),
            Err(e) => {
                if let Error::InvalidState { .. } = e {
                    warn!(job_id = %id, error = %e, "Rejected transition");
                }
                return Err(e);
            }
        };

        next.updated_at = Utc::now();
        invariant::check_job(&next)?;
        let from = current.status;
        book.commit(next.clone(), &event);
        drop(book);

        info!(job_id = %id, from = %from, to = %next.status, "Job transitioned");
        self.publish(event);
        Ok(next)
    }

    fn publish(&self, event: JobEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

fn invalid(job: &JobRecord, operation: &'static str) -> Error {
    Error::InvalidState {
        job: job.id,
        status: job.status,
        operation,
    }
}

fn matched_worker(job: &JobRecord) -> Result<WorkerId> {
    job.matched_worker_id().ok_or_else(|| {
        Error::Internal(format!("job {} is {} without a worker", job.id, job.status))
    })
}
