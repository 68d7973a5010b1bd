//! Read-only dashboard views over a job snapshot.

use serde::Serialize;
use workbee_core::{BusinessId, JobRecord, JobStatus, WorkerId};

/// Headline numbers on the business dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BusinessStats {
    /// Confirmed jobs currently in progress.
    pub active_bookings: usize,
    pub completed_jobs: usize,
    /// `None` when bookings are unlimited.
    pub free_bookings_remaining: Option<u32>,
}

/// A business's jobs grouped the way its dashboard shows them.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessDashboard {
    pub business_id: BusinessId,
    pub searching: Vec<JobRecord>,
    /// Matched and confirmed jobs.
    pub active: Vec<JobRecord>,
    /// Completed and declined jobs.
    pub history: Vec<JobRecord>,
    pub stats: BusinessStats,
}

impl BusinessDashboard {
    /// Group `jobs` owned by `business`, newest first.
    ///
    /// `free_bookings` is the quota (if any) and `bookings_used` what the
    /// business has confirmed so far.
    pub fn project<'a>(
        business: BusinessId,
        jobs: impl IntoIterator<Item = &'a JobRecord>,
        free_bookings: Option<u32>,
        bookings_used: u32,
    ) -> Self {
        let mut searching = Vec::new();
        let mut active = Vec::new();
        let mut history = Vec::new();

        for job in jobs.into_iter().filter(|j| j.business_id == business) {
            match job.status {
                JobStatus::Searching => searching.push(job.clone()),
                JobStatus::Matched | JobStatus::Confirmed => active.push(job.clone()),
                JobStatus::Completed | JobStatus::Declined => history.push(job.clone()),
            }
        }
        for list in [&mut searching, &mut active, &mut history] {
            newest_first(list, |j| j);
        }

        let stats = BusinessStats {
            active_bookings: active
                .iter()
                .filter(|j| j.status == JobStatus::Confirmed)
                .count(),
            completed_jobs: history
                .iter()
                .filter(|j| j.status == JobStatus::Completed)
                .count(),
            free_bookings_remaining: free_bookings.map(|allowed| allowed.saturating_sub(bookings_used)),
        };

        Self {
            business_id: business,
            searching,
            active,
            history,
            stats,
        }
    }
}

/// A job as a worker sees it, with the expected payout.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerJob {
    #[serde(flatten)]
    pub job: JobRecord,
    pub estimated_earnings: f64,
}

impl From<&JobRecord> for WorkerJob {
    fn from(job: &JobRecord) -> Self {
        Self {
            estimated_earnings: job.estimated_earnings(),
            job: job.clone(),
        }
    }
}

/// A worker's jobs grouped the way their dashboard shows them.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerDashboard {
    pub worker_id: WorkerId,
    /// Matched to this worker and waiting for the business to confirm.
    pub offers: Vec<WorkerJob>,
    pub active: Vec<WorkerJob>,
    pub completed: Vec<WorkerJob>,
    /// Sum over completed jobs.
    pub total_earnings: f64,
    pub has_active_job: bool,
}

impl WorkerDashboard {
    pub fn project<'a>(worker: WorkerId, jobs: impl IntoIterator<Item = &'a JobRecord>) -> Self {
        let mut offers = Vec::new();
        let mut active = Vec::new();
        let mut completed = Vec::new();

        for job in jobs
            .into_iter()
            .filter(|j| j.matched_worker_id() == Some(worker))
        {
            match job.status {
                JobStatus::Matched => offers.push(WorkerJob::from(job)),
                JobStatus::Confirmed => active.push(WorkerJob::from(job)),
                JobStatus::Completed => completed.push(WorkerJob::from(job)),
                JobStatus::Searching | JobStatus::Declined => {}
            }
        }
        for list in [&mut offers, &mut active, &mut completed] {
            newest_first(list, |w| &w.job);
        }

        Self {
            worker_id: worker,
            total_earnings: completed.iter().map(|w| w.estimated_earnings).sum(),
            has_active_job: !active.is_empty(),
            offers,
            active,
            completed,
        }
    }
}

fn newest_first<T>(list: &mut [T], job: impl Fn(&T) -> &JobRecord) {
    list.sort_by(|a, b| {
        let (a, b) = (job(a), job(b));
        b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LifecycleEngine;
    use std::collections::BTreeSet;
    use workbee_core::{JobDraft, PayType, UrgencyKind, WorkerProfile};

    fn draft(title: &str, pay: f64, pay_type: PayType, duration: &str) -> JobDraft {
        JobDraft {
            title: title.to_string(),
            description: String::new(),
            location: "Jayanagar, Bangalore".to_string(),
            duration: duration.to_string(),
            pay,
            pay_type,
            skills_required: vec!["Cashier".to_string()],
            urgency: UrgencyKind::Immediate,
            scheduled_date: None,
        }
    }

    fn worker(name: &str) -> WorkerProfile {
        WorkerProfile {
            id: WorkerId::new(),
            name: name.to_string(),
            rating: 4.7,
            completed_jobs: 20,
            skills: BTreeSet::from(["Cashier".to_string()]),
            phone: String::new(),
        }
    }

    #[test]
    fn test_business_dashboard_groups_and_stats() {
        let engine = LifecycleEngine::new(Some(3));
        let business = BusinessId::new();
        let hourly = || draft("Cashier", 200.0, PayType::Hourly, "4 hours");

        let searching = engine.create_job(business, hourly()).unwrap();
        let matched = engine.create_job(business, hourly()).unwrap();
        let confirmed = engine.create_job(business, hourly()).unwrap();
        let done = engine.create_job(business, hourly()).unwrap();
        let cancelled = engine.create_job(business, hourly()).unwrap();
        engine.create_job(BusinessId::new(), hourly()).unwrap();

        engine.propose_match(matched.id, &worker("A")).unwrap();
        engine.propose_match(confirmed.id, &worker("B")).unwrap();
        engine.confirm_match(confirmed.id).unwrap();
        let c = worker("C");
        engine.propose_match(done.id, &c).unwrap();
        engine.confirm_match(done.id).unwrap();
        engine.complete_job(done.id).unwrap();
        engine.cancel_job(cancelled.id).unwrap();

        let snapshot = engine.snapshot();
        let dashboard = BusinessDashboard::project(
            business,
            &snapshot,
            engine.free_bookings(),
            engine.bookings_used(business),
        );

        assert_eq!(dashboard.searching.len(), 1);
        assert_eq!(dashboard.searching[0].id, searching.id);
        assert_eq!(dashboard.active.len(), 2);
        assert_eq!(dashboard.history.len(), 2);
        assert_eq!(dashboard.stats.active_bookings, 1);
        assert_eq!(dashboard.stats.completed_jobs, 1);
        assert_eq!(dashboard.stats.free_bookings_remaining, Some(1));
    }

    #[test]
    fn test_business_dashboard_newest_first() {
        let engine = LifecycleEngine::default();
        let business = BusinessId::new();
        let first = engine
            .create_job(business, draft("First", 100.0, PayType::Fixed, "2 hours"))
            .unwrap();
        let second = engine
            .create_job(business, draft("Second", 100.0, PayType::Fixed, "2 hours"))
            .unwrap();

        let dashboard = BusinessDashboard::project(business, &engine.snapshot(), None, 0);
        let ids: Vec<_> = dashboard.searching.iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(dashboard.stats.free_bookings_remaining, None);
    }

    #[test]
    fn test_worker_dashboard_offers_and_earnings() {
        let engine = LifecycleEngine::default();
        let me = worker("Priya Sharma");
        let business = BusinessId::new();

        let offer = engine
            .create_job(business, draft("Offer", 150.0, PayType::Hourly, "6 hours"))
            .unwrap();
        let finished = engine
            .create_job(business, draft("Finished", 200.0, PayType::Hourly, "4 hours"))
            .unwrap();
        let daily = engine
            .create_job(business, draft("Daily", 1500.0, PayType::Daily, "8 hours"))
            .unwrap();
        let someone_else = engine
            .create_job(business, draft("Other", 100.0, PayType::Fixed, "1 hour"))
            .unwrap();

        engine.propose_match(offer.id, &me).unwrap();
        for job in [finished.id, daily.id] {
            engine.propose_match(job, &me).unwrap();
            engine.confirm_match(job).unwrap();
            engine.complete_job(job).unwrap();
        }
        engine.propose_match(someone_else.id, &worker("Ravi")).unwrap();

        let dashboard = WorkerDashboard::project(me.id, &engine.snapshot());
        assert_eq!(dashboard.offers.len(), 1);
        assert_eq!(dashboard.offers[0].estimated_earnings, 900.0);
        assert!(dashboard.active.is_empty());
        assert!(!dashboard.has_active_job);
        assert_eq!(dashboard.completed.len(), 2);
        assert_eq!(dashboard.total_earnings, 800.0 + 1500.0);
    }

    #[test]
    fn test_worker_dashboard_active_job() {
        let engine = LifecycleEngine::default();
        let me = worker("Asha");
        let job = engine
            .create_job(BusinessId::new(), draft("Shift", 120.0, PayType::Hourly, "evening"))
            .unwrap();
        engine.propose_match(job.id, &me).unwrap();
        engine.confirm_match(job.id).unwrap();

        let dashboard = WorkerDashboard::project(me.id, &engine.snapshot());
        assert!(dashboard.has_active_job);
        // Unparseable duration counts as one hour.
        assert_eq!(dashboard.active[0].estimated_earnings, 120.0);
        assert_eq!(dashboard.total_earnings, 0.0);
    }

    #[test]
    fn test_worker_job_serializes_flat() {
        let engine = LifecycleEngine::default();
        let job = engine
            .create_job(BusinessId::new(), draft("Shift", 100.0, PayType::Fixed, "2 hours"))
            .unwrap();
        let json = serde_json::to_value(WorkerJob::from(&job)).unwrap();
        assert_eq!(json["title"], "Shift");
        assert_eq!(json["estimated_earnings"], 100.0);
    }
}
