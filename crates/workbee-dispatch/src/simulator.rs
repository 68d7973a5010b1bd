//! Matching simulator - proposes workers from a fixed roster after a delay.
//!
//! Stands in for a real dispatch backend. Each searching job gets a timer
//! task; when it fires the best eligible worker is proposed through the
//! engine. Cancelling a job aborts its timer.

use rand::Rng;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use workbee_config::{SimulatorConfig, WorkBeeConfig};
use workbee_core::{Error, JobId, JobRecord, JobStatus, Result, WorkerId, WorkerProfile};

use crate::engine::{JobEvent, LifecycleEngine};
use crate::invariant;

/// Finds workers for searching jobs.
pub trait Dispatcher: Send + Sync {
    /// Name of this dispatcher (e.g., "simulator").
    fn name(&self) -> &str;

    /// Start looking for a worker. Replaces any search already running.
    fn dispatch(&self, job: JobId);

    /// Stop looking. Returns true if a pending search was aborted.
    fn withdraw(&self, job: JobId) -> bool;

    /// Where the search for `job` stands, if one was started.
    fn state(&self, job: JobId) -> Option<MatchState>;
}

/// Progress of a search, polled by dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MatchState {
    Pending,
    /// Nobody eligible right now; retried when a worker frees up.
    NoMatch,
    Proposed { worker: WorkerId },
}

/// How long to wait before proposing a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDelay {
    Fixed(Duration),
    /// Uniform between `min` and `max`, inclusive.
    Jittered { min: Duration, max: Duration },
}

impl MatchDelay {
    pub fn sample(&self) -> Duration {
        match *self {
            MatchDelay::Fixed(delay) => delay,
            MatchDelay::Jittered { min, max } if max > min => {
                let span = (max - min).as_millis() as u64;
                min + Duration::from_millis(rand::rng().random_range(0..=span))
            }
            MatchDelay::Jittered { min, .. } => min,
        }
    }
}

impl From<&SimulatorConfig> for MatchDelay {
    fn from(config: &SimulatorConfig) -> Self {
        if config.jitter.is_zero() {
            MatchDelay::Fixed(config.delay)
        } else {
            MatchDelay::Jittered {
                min: config.delay,
                max: config.delay + config.jitter,
            }
        }
    }
}

/// Best eligible worker for `job`.
///
/// Eligible workers share a skill with the job, are not matched or confirmed
/// anywhere in `jobs`, and are not in `excluded`. Highest rating wins, then
/// most completed jobs, then name.
pub fn select_worker<'a>(
    job: &JobRecord,
    roster: &'a [WorkerProfile],
    jobs: &[JobRecord],
    excluded: &HashSet<WorkerId>,
) -> Option<&'a WorkerProfile> {
    roster
        .iter()
        .filter(|w| w.has_skill_overlap(&job.skills_required))
        .filter(|w| !excluded.contains(&w.id))
        .filter(|w| !invariant::is_worker_busy(w.id, jobs))
        .min_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then(b.completed_jobs.cmp(&a.completed_jobs))
                .then_with(|| a.name.cmp(&b.name))
        })
}

#[derive(Default)]
struct Tracker {
    next_generation: u64,
    /// Timer per job, tagged so a superseded timer knows to stand down.
    pending: HashMap<JobId, (u64, JoinHandle<()>)>,
    states: HashMap<JobId, MatchState>,
    /// Workers the business already turned down for a job.
    rejected: HashMap<JobId, HashSet<WorkerId>>,
}

struct Inner {
    engine: Arc<LifecycleEngine>,
    delay: MatchDelay,
    roster: RwLock<Vec<WorkerProfile>>,
    tracker: Mutex<Tracker>,
}

/// Roster-based [`Dispatcher`] driven by engine events.
#[derive(Clone)]
pub struct MatchingSimulator {
    inner: Arc<Inner>,
}

impl MatchingSimulator {
    pub fn new(engine: Arc<LifecycleEngine>, roster: Vec<WorkerProfile>, delay: MatchDelay) -> Self {
        Self {
            inner: Arc::new(Inner {
                engine,
                delay,
                roster: RwLock::new(roster),
                tracker: Mutex::new(Tracker::default()),
            }),
        }
    }

    pub fn from_config(engine: Arc<LifecycleEngine>, config: &WorkBeeConfig) -> Self {
        Self::new(
            engine,
            config.roster.clone(),
            MatchDelay::from(&config.simulator),
        )
    }

    /// Add a worker to the roster, replacing any profile with the same id.
    ///
    /// Jobs that found nobody so far are tried again against the new roster.
    pub fn enroll(&self, worker: WorkerProfile) -> Result<()> {
        worker.validate()?;
        {
            let mut roster = self
                .inner
                .roster
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            match roster.iter_mut().find(|w| w.id == worker.id) {
                Some(existing) => *existing = worker,
                None => {
                    info!(worker_id = %worker.id, name = %worker.name, "Worker enrolled");
                    roster.push(worker);
                }
            }
        }
        self.retry_unmatched();
        Ok(())
    }

    pub fn roster(&self) -> Vec<WorkerProfile> {
        self.inner
            .roster
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Follow engine events in a background task.
    pub fn start(&self) -> JoinHandle<()> {
        let events = self.inner.engine.subscribe();
        let simulator = self.clone();
        tokio::spawn(async move { simulator.run(events).await })
    }

    /// React to engine events until the channel closes.
    pub async fn run(self, mut events: broadcast::Receiver<JobEvent>) {
        info!("Matching simulator started");
        loop {
            match events.recv().await {
                Ok(event) => self.handle(&event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Simulator fell behind job events");
                    self.resync();
                }
                Err(RecvError::Closed) => break,
            }
        }
        info!("Matching simulator stopped");
    }

    fn handle(&self, event: &JobEvent) {
        debug!(?event, "Simulator received event");
        match *event {
            JobEvent::Created { job } => self.dispatch(job),
            JobEvent::Rejected { job, worker } => {
                self.inner
                    .tracker()
                    .rejected
                    .entry(job)
                    .or_default()
                    .insert(worker);
                self.dispatch(job);
                self.retry_unmatched();
            }
            JobEvent::Cancelled { job, .. } => {
                self.withdraw(job);
                self.retry_unmatched();
            }
            JobEvent::Confirmed { job, .. } => self.inner.forget(job),
            JobEvent::Completed { job, .. } => {
                self.inner.forget(job);
                self.retry_unmatched();
            }
            JobEvent::Matched { .. } => {}
        }
    }

    /// Rebuild tracking from the engine after missing events.
    ///
    /// Every searching job without a running timer is dispatched again and
    /// jobs that left the search are dropped.
    fn resync(&self) {
        let jobs = self.inner.engine.snapshot();
        let searching: Vec<JobId> = {
            let mut tracker = self.inner.tracker();
            let mut searching = Vec::new();
            for job in &jobs {
                match job.status {
                    JobStatus::Searching => {
                        if !tracker.pending.contains_key(&job.id) {
                            searching.push(job.id);
                        }
                    }
                    JobStatus::Matched => {}
                    _ => {
                        tracker.states.remove(&job.id);
                        tracker.rejected.remove(&job.id);
                    }
                }
            }
            searching
        };
        debug!(count = searching.len(), "Redispatching searching jobs");
        for job in searching {
            self.dispatch(job);
        }
    }

    /// Dispatch again every job that found nobody last time.
    fn retry_unmatched(&self) {
        let waiting: Vec<JobId> = self
            .inner
            .tracker()
            .states
            .iter()
            .filter(|(_, state)| **state == MatchState::NoMatch)
            .map(|(job, _)| *job)
            .collect();
        for job in waiting {
            self.dispatch(job);
        }
    }
}

impl Inner {
    fn tracker(&self) -> MutexGuard<'_, Tracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn forget(&self, job: JobId) {
        let mut tracker = self.tracker();
        tracker.states.remove(&job);
        tracker.rejected.remove(&job);
    }

    /// Timer callback: propose the best worker if the job is still searching.
    fn attempt(&self, job_id: JobId, generation: u64) {
        {
            let mut tracker = self.tracker();
            match tracker.pending.get(&job_id) {
                Some((current, _)) if *current == generation => {
                    tracker.pending.remove(&job_id);
                }
                _ => return,
            }
        }

        let job = match self.engine.get(job_id) {
            Ok(job) => job,
            Err(e) => {
                warn!(job_id = %job_id, error = %e, "Dispatched job disappeared");
                self.forget(job_id);
                return;
            }
        };
        if job.status != JobStatus::Searching {
            debug!(job_id = %job_id, status = %job.status, "Job no longer searching");
            self.forget(job_id);
            return;
        }

        // Held from the snapshot until the outcome is recorded. Timers run
        // one at a time through here, so no two see the same worker as free,
        // and a worker freed meanwhile is seen by `retry_unmatched`.
        let mut tracker = self.tracker();
        let snapshot = self.engine.snapshot();
        let worker = {
            let roster = self.roster.read().unwrap_or_else(PoisonError::into_inner);
            let excluded = tracker.rejected.get(&job_id).cloned().unwrap_or_default();
            match select_worker(&job, &roster, &snapshot, &excluded) {
                Some(worker) => worker.clone(),
                None => {
                    info!(job_id = %job_id, "No eligible worker available");
                    tracker.states.insert(job_id, MatchState::NoMatch);
                    return;
                }
            }
        };

        match self.engine.propose_match(job_id, &worker) {
            Ok(_) => {
                info!(job_id = %job_id, worker_id = %worker.id, worker = %worker.name, "Worker proposed");
                tracker
                    .states
                    .insert(job_id, MatchState::Proposed { worker: worker.id });
            }
            Err(e) => {
                match e {
                    // Cancelled while we were choosing.
                    Error::InvalidState { status, .. } => {
                        debug!(job_id = %job_id, status = %status, "Proposal overtaken")
                    }
                    e => warn!(job_id = %job_id, error = %e, "Failed to propose worker"),
                }
                tracker.states.remove(&job_id);
                tracker.rejected.remove(&job_id);
            }
        }
    }
}

impl Dispatcher for MatchingSimulator {
    fn name(&self) -> &str {
        "simulator"
    }

    fn dispatch(&self, job: JobId) {
        let delay = self.inner.delay.sample();
        let mut tracker = self.inner.tracker();
        tracker.next_generation += 1;
        let generation = tracker.next_generation;
        tracker.states.insert(job, MatchState::Pending);

        // The task takes the tracker lock first thing, so it cannot run
        // ahead of the insert below.
        let inner = self.inner.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            inner.attempt(job, generation);
        });

        if let Some((_, previous)) = tracker.pending.insert(job, (generation, handle)) {
            previous.abort();
        }
        debug!(job_id = %job, delay_ms = delay.as_millis() as u64, "Match scheduled");
    }

    fn withdraw(&self, job: JobId) -> bool {
        let mut tracker = self.inner.tracker();
        tracker.states.remove(&job);
        tracker.rejected.remove(&job);
        match tracker.pending.remove(&job) {
            Some((_, handle)) => {
                handle.abort();
                debug!(job_id = %job, "Pending match withdrawn");
                true
            }
            None => false,
        }
    }

    fn state(&self, job: JobId) -> Option<MatchState> {
        self.inner.tracker().states.get(&job).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use workbee_core::{BusinessId, JobDraft, PayType, UrgencyKind};

    const FAST: MatchDelay = MatchDelay::Fixed(Duration::from_millis(10));

    fn worker(name: &str, rating: f32, completed_jobs: u32, skills: &[&str]) -> WorkerProfile {
        WorkerProfile {
            id: WorkerId::new(),
            name: name.to_string(),
            rating,
            completed_jobs,
            skills: skills.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            phone: String::new(),
        }
    }

    fn draft(skill: &str) -> JobDraft {
        JobDraft {
            title: "Weekend Help".to_string(),
            description: String::new(),
            location: "Indiranagar, Bangalore".to_string(),
            duration: "8 hours".to_string(),
            pay: 1200.0,
            pay_type: PayType::Daily,
            skills_required: vec![skill.to_string()],
            urgency: UrgencyKind::Tomorrow,
            scheduled_date: None,
        }
    }

    async fn wait_for<F>(mut done: F)
    where
        F: FnMut() -> bool,
    {
        for _ in 0..200 {
            if done() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached in time");
    }

    #[test]
    fn test_select_worker_ranking() {
        let engine = LifecycleEngine::default();
        let job = engine.create_job(BusinessId::new(), draft("Cashier")).unwrap();
        let roster = vec![
            worker("Zoya", 4.8, 10, &["Cashier"]),
            worker("Amit", 4.8, 10, &["cashier"]),
            worker("Ravi", 4.8, 3, &["Cashier"]),
            worker("Meera", 5.0, 200, &["Inventory Manager"]),
        ];

        let chosen = select_worker(&job, &roster, &[], &HashSet::new()).unwrap();
        assert_eq!(chosen.name, "Amit");

        let excluded = HashSet::from([roster[1].id]);
        let chosen = select_worker(&job, &roster, &[], &excluded).unwrap();
        assert_eq!(chosen.name, "Zoya");
    }

    #[test]
    fn test_select_worker_skips_busy() {
        let engine = LifecycleEngine::default();
        let busy = worker("Amit", 5.0, 10, &["Cashier"]);
        let free = worker("Ravi", 3.0, 1, &["Cashier"]);
        let first = engine.create_job(BusinessId::new(), draft("Cashier")).unwrap();
        engine.propose_match(first.id, &busy).unwrap();
        let second = engine.create_job(BusinessId::new(), draft("Cashier")).unwrap();

        let roster = vec![busy, free];
        let chosen = select_worker(&second, &roster, &engine.snapshot(), &HashSet::new());
        assert_eq!(chosen.map(|w| w.name.as_str()), Some("Ravi"));
    }

    #[test]
    fn test_match_delay_sampling() {
        let fixed = MatchDelay::Fixed(Duration::from_millis(250));
        assert_eq!(fixed.sample(), Duration::from_millis(250));

        let jittered = MatchDelay::Jittered {
            min: Duration::from_millis(100),
            max: Duration::from_millis(150),
        };
        for _ in 0..50 {
            let d = jittered.sample();
            assert!(d >= Duration::from_millis(100) && d <= Duration::from_millis(150));
        }

        let config = SimulatorConfig {
            delay: Duration::from_millis(100),
            jitter: Duration::from_millis(50),
        };
        assert_eq!(MatchDelay::from(&config), jittered);
    }

    #[tokio::test]
    async fn test_dispatch_proposes_best_worker() {
        let engine = Arc::new(LifecycleEngine::default());
        let best = worker("Priya Sharma", 4.9, 203, &["Sales Assistant"]);
        let roster = vec![worker("Amit", 4.5, 50, &["Sales Assistant"]), best.clone()];
        let simulator = MatchingSimulator::new(engine.clone(), roster, FAST);

        let job = engine.create_job(BusinessId::new(), draft("Sales Assistant")).unwrap();
        simulator.dispatch(job.id);
        assert_eq!(simulator.state(job.id), Some(MatchState::Pending));

        wait_for(|| simulator.state(job.id) != Some(MatchState::Pending)).await;
        assert_eq!(
            simulator.state(job.id),
            Some(MatchState::Proposed { worker: best.id })
        );
        let matched = engine.get(job.id).unwrap();
        assert_eq!(matched.status, JobStatus::Matched);
        assert_eq!(matched.matched_worker_id(), Some(best.id));
    }

    #[tokio::test]
    async fn test_no_eligible_worker_reports_no_match() {
        let engine = Arc::new(LifecycleEngine::default());
        let roster = vec![worker("Amit", 4.5, 50, &["Cashier"])];
        let simulator = MatchingSimulator::new(engine.clone(), roster, FAST);

        let job = engine.create_job(BusinessId::new(), draft("Inventory Manager")).unwrap();
        simulator.dispatch(job.id);

        wait_for(|| simulator.state(job.id) == Some(MatchState::NoMatch)).await;
        assert_eq!(engine.get(job.id).unwrap().status, JobStatus::Searching);
    }

    #[tokio::test]
    async fn test_cancel_before_timer_fires() {
        let engine = Arc::new(LifecycleEngine::default());
        let roster = vec![worker("Amit", 4.5, 50, &["Cashier"])];
        let simulator =
            MatchingSimulator::new(engine.clone(), roster, MatchDelay::Fixed(Duration::from_millis(50)));

        let job = engine.create_job(BusinessId::new(), draft("Cashier")).unwrap();
        simulator.dispatch(job.id);
        engine.cancel_job(job.id).unwrap();
        assert!(simulator.withdraw(job.id));
        assert!(!simulator.withdraw(job.id));

        tokio::time::sleep(Duration::from_millis(100)).await;
        let cancelled = engine.get(job.id).unwrap();
        assert_eq!(cancelled.status, JobStatus::Declined);
        assert!(cancelled.matched_worker.is_none());
        assert_eq!(simulator.state(job.id), None);
    }

    #[tokio::test]
    async fn test_late_timer_after_cancel_changes_nothing() {
        let engine = Arc::new(LifecycleEngine::default());
        let roster = vec![worker("Amit", 4.5, 50, &["Cashier"])];
        let simulator = MatchingSimulator::new(engine.clone(), roster, FAST);

        let job = engine.create_job(BusinessId::new(), draft("Cashier")).unwrap();
        simulator.dispatch(job.id);
        // Cancel without withdrawing; the timer fires and finds nothing to do.
        engine.cancel_job(job.id).unwrap();

        wait_for(|| simulator.state(job.id).is_none()).await;
        assert_eq!(engine.get(job.id).unwrap().status, JobStatus::Declined);
    }

    #[tokio::test]
    async fn test_run_loop_rematches_after_reject() {
        let engine = Arc::new(LifecycleEngine::default());
        let first = worker("Priya Sharma", 4.9, 203, &["Cashier"]);
        let second = worker("Rajesh Kumar", 4.8, 156, &["Cashier"]);
        let simulator =
            MatchingSimulator::new(engine.clone(), vec![first.clone(), second.clone()], FAST);
        let handle = simulator.start();

        let job = engine.create_job(BusinessId::new(), draft("Cashier")).unwrap();
        wait_for(|| engine.get(job.id).unwrap().status == JobStatus::Matched).await;
        assert_eq!(engine.get(job.id).unwrap().matched_worker_id(), Some(first.id));

        engine.reject_match(job.id).unwrap();
        wait_for(|| engine.get(job.id).unwrap().status == JobStatus::Matched).await;
        assert_eq!(engine.get(job.id).unwrap().matched_worker_id(), Some(second.id));

        handle.abort();
    }

    #[tokio::test]
    async fn test_no_match_retried_when_worker_frees_up() {
        let engine = Arc::new(LifecycleEngine::default());
        let only = worker("Priya Sharma", 4.9, 203, &["Cashier"]);
        let simulator = MatchingSimulator::new(engine.clone(), vec![only.clone()], FAST);
        let handle = simulator.start();

        let a = engine.create_job(BusinessId::new(), draft("Cashier")).unwrap();
        wait_for(|| engine.get(a.id).unwrap().status == JobStatus::Matched).await;
        engine.confirm_match(a.id).unwrap();

        let b = engine.create_job(BusinessId::new(), draft("Cashier")).unwrap();
        wait_for(|| simulator.state(b.id) == Some(MatchState::NoMatch)).await;

        engine.complete_job(a.id).unwrap();
        wait_for(|| engine.get(b.id).unwrap().status == JobStatus::Matched).await;
        assert_eq!(engine.get(b.id).unwrap().matched_worker_id(), Some(only.id));

        handle.abort();
    }

    #[tokio::test]
    async fn test_lagged_events_still_dispatch_every_job() {
        let engine = Arc::new(LifecycleEngine::default());
        let simulator = MatchingSimulator::new(engine.clone(), Vec::new(), FAST);
        let handle = simulator.start();

        // More jobs than the event channel holds, before the loop gets to run.
        let jobs: Vec<JobId> = (0..300)
            .map(|_| engine.create_job(BusinessId::new(), draft("Cashier")).unwrap().id)
            .collect();

        wait_for(|| {
            jobs.iter()
                .all(|id| simulator.state(*id) == Some(MatchState::NoMatch))
        })
        .await;
        handle.abort();
    }

    #[tokio::test]
    async fn test_tracking_dropped_once_job_is_booked() {
        let engine = Arc::new(LifecycleEngine::default());
        let first = worker("Priya Sharma", 4.9, 203, &["Cashier"]);
        let second = worker("Rajesh Kumar", 4.8, 156, &["Cashier"]);
        let simulator = MatchingSimulator::new(engine.clone(), vec![first, second.clone()], FAST);
        let handle = simulator.start();

        let job = engine.create_job(BusinessId::new(), draft("Cashier")).unwrap();
        wait_for(|| engine.get(job.id).unwrap().status == JobStatus::Matched).await;
        engine.reject_match(job.id).unwrap();
        wait_for(|| simulator.state(job.id) == Some(MatchState::Proposed { worker: second.id })).await;

        engine.confirm_match(job.id).unwrap();
        wait_for(|| simulator.state(job.id).is_none()).await;
        engine.complete_job(job.id).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(simulator.state(job.id), None);
        let tracker = simulator.inner.tracker();
        assert!(tracker.states.is_empty());
        assert!(tracker.rejected.is_empty());
        drop(tracker);
        handle.abort();
    }

    #[tokio::test]
    async fn test_enrolled_worker_picks_up_unmatched_job() {
        let engine = Arc::new(LifecycleEngine::default());
        let simulator = MatchingSimulator::new(engine.clone(), Vec::new(), FAST);
        let handle = simulator.start();

        let job = engine.create_job(BusinessId::new(), draft("Cashier")).unwrap();
        wait_for(|| simulator.state(job.id) == Some(MatchState::NoMatch)).await;

        let newcomer = worker("Asha", 0.0, 0, &["cashier"]);
        simulator.enroll(newcomer.clone()).unwrap();
        wait_for(|| engine.get(job.id).unwrap().status == JobStatus::Matched).await;
        assert_eq!(engine.get(job.id).unwrap().matched_worker_id(), Some(newcomer.id));
        handle.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_simultaneous_timers_propose_worker_once() {
        let engine = Arc::new(LifecycleEngine::default());
        let only = worker("Priya Sharma", 4.9, 203, &["Cashier"]);
        let simulator = MatchingSimulator::new(engine.clone(), vec![only.clone()], FAST);

        let jobs: Vec<JobId> = (0..8)
            .map(|_| engine.create_job(BusinessId::new(), draft("Cashier")).unwrap().id)
            .collect();
        for id in &jobs {
            simulator.dispatch(*id);
        }
        wait_for(|| {
            jobs.iter()
                .all(|id| simulator.state(*id) != Some(MatchState::Pending))
        })
        .await;

        let matched: Vec<JobRecord> = engine
            .snapshot()
            .into_iter()
            .filter(|j| j.status == JobStatus::Matched)
            .collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].matched_worker_id(), Some(only.id));
        let no_match = jobs
            .iter()
            .filter(|id| simulator.state(**id) == Some(MatchState::NoMatch))
            .count();
        assert_eq!(no_match, 7);
    }

    #[tokio::test]
    async fn test_enroll_replaces_same_id() {
        let engine = Arc::new(LifecycleEngine::default());
        let simulator = MatchingSimulator::new(engine, Vec::new(), FAST);
        let mut w = worker("Asha", 4.0, 0, &["Cashier"]);
        simulator.enroll(w.clone()).unwrap();
        w.rating = 4.5;
        simulator.enroll(w.clone()).unwrap();

        let roster = simulator.roster();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].rating, 4.5);

        let nameless = worker("", 4.0, 0, &["Cashier"]);
        assert!(simulator.enroll(nameless).is_err());
        assert_eq!(simulator.name(), "simulator");
    }
}
