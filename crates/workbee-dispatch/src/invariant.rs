//! Invariant checks over a set of job records.
//!
//! A worker may appear on any number of `matched` jobs while businesses
//! preview them, but may be committed (`confirmed`) to only one job at a time.

use std::collections::HashMap;
use workbee_core::{Error, JobId, JobRecord, JobStatus, Result, WorkerId};

/// Whether the worker is matched or confirmed on any job.
pub fn is_worker_busy<'a>(worker: WorkerId, jobs: impl IntoIterator<Item = &'a JobRecord>) -> bool {
    jobs.into_iter()
        .any(|j| j.status.is_active() && j.matched_worker_id() == Some(worker))
}

/// A confirmed job held by `worker`, other than `excluding`.
pub fn committed_job<'a>(
    worker: WorkerId,
    jobs: impl IntoIterator<Item = &'a JobRecord>,
    excluding: JobId,
) -> Option<JobId> {
    jobs.into_iter()
        .find(|j| {
            j.id != excluding
                && j.status == JobStatus::Confirmed
                && j.matched_worker_id() == Some(worker)
        })
        .map(|j| j.id)
}

/// A job carries a matched worker exactly when its status requires one.
pub fn check_job(job: &JobRecord) -> Result<()> {
    match (job.status.holds_worker(), job.matched_worker.is_some()) {
        (true, false) => Err(Error::Internal(format!(
            "job {} is {} without a matched worker",
            job.id, job.status
        ))),
        (false, true) => Err(Error::Internal(format!(
            "job {} is {} but still references a worker",
            job.id, job.status
        ))),
        _ => Ok(()),
    }
}

/// Check every record and the one-committed-job-per-worker rule.
pub fn check_all<'a>(jobs: impl IntoIterator<Item = &'a JobRecord>) -> Result<()> {
    let mut committed: HashMap<WorkerId, JobId> = HashMap::new();

    for job in jobs {
        check_job(job)?;
        if job.status != JobStatus::Confirmed {
            continue;
        }
        if let Some(worker) = job.matched_worker_id() {
            if let Some(other) = committed.insert(worker, job.id) {
                return Err(Error::Internal(format!(
                    "worker {} is committed to both {} and {}",
                    worker, other, job.id
                )));
            }
        }
    }

    Ok(())
}
