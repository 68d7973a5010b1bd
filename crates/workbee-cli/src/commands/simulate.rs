//! Simulated matching session.
//!
//! Posts jobs, lets the matching simulator propose workers and plays the
//! business side: every proposal is confirmed and every confirmed job is
//! completed straight away.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;
use workbee_config::{WorkBeeConfig, load_config};
use workbee_core::{
    BusinessId, Error, JobDraft, JobStatus, PayType, UrgencyKind, WorkerId, WorkerProfile,
};
use workbee_dispatch::{JobEvent, LifecycleEngine, MatchDelay, MatchingSimulator, invariant};

/// Outcome of a simulated session.
#[derive(Debug, Default)]
pub struct Summary {
    pub posted: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Confirmations refused because the worker was already committed.
    pub conflicts: usize,
    pub by_worker: BTreeMap<String, usize>,
}

fn sample_roster() -> Vec<WorkerProfile> {
    let worker = |name: &str, rating: f32, completed_jobs: u32, skills: &[&str]| WorkerProfile {
        id: WorkerId::new(),
        name: name.to_string(),
        rating,
        completed_jobs,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        phone: String::new(),
    };
    vec![
        worker("Rajesh Kumar", 4.8, 156, &["Cashier", "Customer Service"]),
        worker("Priya Sharma", 4.9, 203, &["Sales Assistant", "Product Display"]),
        worker("Amit Verma", 4.6, 74, &["Store Helper", "Cashier"]),
    ]
}

fn draft(n: usize, skill: &str) -> JobDraft {
    JobDraft {
        title: format!("{} #{}", skill, n + 1),
        description: String::new(),
        location: "MG Road, Bangalore".to_string(),
        duration: "4 hours".to_string(),
        pay: 180.0,
        pay_type: PayType::Hourly,
        skills_required: vec![skill.to_string()],
        urgency: UrgencyKind::Immediate,
        scheduled_date: None,
    }
}

pub async fn run(config_path: Option<&str>, jobs: usize, idle_secs: u64) -> Result<()> {
    let config = match config_path {
        Some(path) => load_config(path).with_context(|| format!("Failed to load {}", path))?,
        None => WorkBeeConfig::default(),
    };

    println!("--- Posting {} jobs ---\n", jobs);
    let summary = simulate(&config, jobs, Duration::from_secs(idle_secs)).await?;

    println!("\n--- Summary ---");
    println!("  posted:    {}", summary.posted);
    println!("  completed: {}", summary.completed);
    println!("  cancelled: {}", summary.cancelled);
    println!("  conflicts: {}", summary.conflicts);
    for (worker, count) in &summary.by_worker {
        println!("  {} - {} jobs", worker, count);
    }
    Ok(())
}

/// Run a session against `config`, falling back to a sample roster.
///
/// Jobs still open after `idle` passes without any event are cancelled.
pub async fn simulate(config: &WorkBeeConfig, jobs: usize, idle: Duration) -> Result<Summary> {
    let roster = if config.roster.is_empty() {
        sample_roster()
    } else {
        config.roster.clone()
    };
    let skills: Vec<String> = roster
        .iter()
        .flat_map(|w| w.skills.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    anyhow::ensure!(!skills.is_empty(), "roster has no skills to post jobs for");

    let engine = Arc::new(LifecycleEngine::from_config(&config.engine));
    let simulator = MatchingSimulator::new(
        engine.clone(),
        roster,
        MatchDelay::from(&config.simulator),
    );
    let mut events = engine.subscribe();
    let handle = simulator.start();

    let mut summary = Summary::default();
    for n in 0..jobs {
        let skill = &skills[n % skills.len()];
        // One business per job keeps the free quota out of the way.
        let job = engine.create_job(BusinessId::new(), draft(n, skill))?;
        println!("Posted   {} ({})", job.title, job.id);
        summary.posted += 1;
    }

    let mut open = summary.posted;
    while open > 0 {
        let event = match tokio::time::timeout(idle, events.recv()).await {
            Err(_) => {
                warn!(open, "No progress, giving up on remaining jobs");
                break;
            }
            Ok(Err(RecvError::Lagged(skipped))) => {
                warn!(skipped, "Missed job events");
                continue;
            }
            Ok(Err(RecvError::Closed)) => break,
            Ok(Ok(event)) => event,
        };

        match event {
            JobEvent::Matched { job, .. } => match engine.confirm_match(job) {
                Ok(_) => {}
                Err(Error::WorkerBusy { worker, .. }) => {
                    println!("Busy     worker {} already committed, rejecting", worker);
                    summary.conflicts += 1;
                    engine.reject_match(job)?;
                }
                Err(e) => return Err(e.into()),
            },
            JobEvent::Confirmed { job, .. } => {
                engine.complete_job(job)?;
            }
            JobEvent::Completed { job, .. } => {
                let record = engine.get(job)?;
                let worker = record
                    .matched_worker
                    .map(|w| w.name)
                    .unwrap_or_default();
                println!("Done     {} by {}", record.title, worker);
                *summary.by_worker.entry(worker).or_default() += 1;
                summary.completed += 1;
                open -= 1;
            }
            JobEvent::Cancelled { .. } => {
                summary.cancelled += 1;
                open -= 1;
            }
            JobEvent::Created { .. } | JobEvent::Rejected { .. } => {}
        }
    }

    for job in engine.snapshot() {
        if matches!(job.status, JobStatus::Searching | JobStatus::Matched) {
            engine.cancel_job(job.id)?;
            println!("Cancelled {} (no worker found)", job.title);
            summary.cancelled += 1;
        }
    }

    handle.abort();
    invariant::check_all(&engine.snapshot())?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> WorkBeeConfig {
        let mut config = WorkBeeConfig::default();
        config.simulator.delay = Duration::from_millis(1);
        config
    }

    #[tokio::test]
    async fn test_every_job_gets_staffed() {
        let summary = simulate(&fast_config(), 8, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(summary.posted, 8);
        assert_eq!(summary.completed, 8);
        assert_eq!(summary.cancelled, 0);
        assert_eq!(summary.by_worker.values().sum::<usize>(), 8);
    }

    #[tokio::test]
    async fn test_single_worker_takes_jobs_in_turn() {
        let mut config = fast_config();
        config.roster = sample_roster();
        config.roster.truncate(1);

        let summary = simulate(&config, 3, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.by_worker.get("Rajesh Kumar"), Some(&3));
    }
}
