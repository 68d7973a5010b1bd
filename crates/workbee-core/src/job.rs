//! Job records and their lifecycle states.

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::id::{BusinessId, JobId, WorkerId};
use crate::{Error, Result};

/// How the quoted pay is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    #[display("hourly")]
    Hourly,
    #[display("daily")]
    Daily,
    #[display("fixed")]
    Fixed,
}

/// Urgency as submitted, before the scheduled date is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyKind {
    #[display("immediate")]
    Immediate,
    #[display("today")]
    Today,
    #[display("tomorrow")]
    Tomorrow,
    #[display("scheduled")]
    Scheduled,
}

/// When the business needs the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Urgency {
    Immediate,
    Today,
    Tomorrow,
    Scheduled { date: NaiveDate },
}

impl Urgency {
    pub fn kind(&self) -> UrgencyKind {
        match self {
            Urgency::Immediate => UrgencyKind::Immediate,
            Urgency::Today => UrgencyKind::Today,
            Urgency::Tomorrow => UrgencyKind::Tomorrow,
            Urgency::Scheduled { .. } => UrgencyKind::Scheduled,
        }
    }

    pub fn scheduled_date(&self) -> Option<NaiveDate> {
        match self {
            Urgency::Scheduled { date } => Some(*date),
            _ => None,
        }
    }
}

/// Lifecycle state of a job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Waiting for a worker to be found.
    #[display("searching")]
    Searching,
    /// A worker was proposed; the business has not confirmed yet.
    #[display("matched")]
    Matched,
    /// The business confirmed the worker, who is now committed.
    #[display("confirmed")]
    Confirmed,
    /// The work is done.
    #[display("completed")]
    Completed,
    /// The business cancelled the request.
    #[display("declined")]
    Declined,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Declined)
    }

    /// States in which the record must carry a matched worker.
    pub fn holds_worker(&self) -> bool {
        matches!(
            self,
            JobStatus::Matched | JobStatus::Confirmed | JobStatus::Completed
        )
    }

    /// States that keep the worker occupied.
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Matched | JobStatus::Confirmed)
    }
}

/// The worker details embedded in a job once a match is proposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRef {
    pub id: WorkerId,
    pub name: String,
    pub rating: f32,
    pub phone: String,
}

/// A staffing request as submitted by a business, not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    pub duration: String,
    pub pay: f64,
    pub pay_type: PayType,
    pub skills_required: Vec<String>,
    pub urgency: UrgencyKind,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
}

/// One staffing request moving through the lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    /// The business that posted the job. Never changes.
    pub business_id: BusinessId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub duration: String,
    pub pay: f64,
    pub pay_type: PayType,
    pub skills_required: BTreeSet<String>,
    pub urgency: Urgency,
    pub status: JobStatus,
    pub matched_worker: Option<WorkerRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn required(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

impl JobRecord {
    /// Validate a draft and build a new record in `Searching`.
    ///
    /// `now` is the creation time; its date is the earliest allowed
    /// scheduled date.
    pub fn create(business_id: BusinessId, draft: JobDraft, now: DateTime<Utc>) -> Result<Self> {
        let title = required("title", draft.title)?;
        let location = required("location", draft.location)?;
        let duration = required("duration", draft.duration)?;

        if !draft.pay.is_finite() || draft.pay <= 0.0 {
            return Err(Error::Validation("pay must be greater than zero".to_string()));
        }

        let mut skills_required = BTreeSet::new();
        for skill in draft.skills_required {
            skills_required.insert(required("skill", skill)?);
        }
        if skills_required.is_empty() {
            return Err(Error::Validation(
                "at least one required skill must be given".to_string(),
            ));
        }

        let urgency = match draft.urgency {
            UrgencyKind::Immediate => Urgency::Immediate,
            UrgencyKind::Today => Urgency::Today,
            UrgencyKind::Tomorrow => Urgency::Tomorrow,
            UrgencyKind::Scheduled => {
                let date = draft.scheduled_date.ok_or_else(|| {
                    Error::Validation("scheduled jobs need a scheduled date".to_string())
                })?;
                if date < now.date_naive() {
                    return Err(Error::Validation(format!(
                        "scheduled date {} is in the past",
                        date
                    )));
                }
                Urgency::Scheduled { date }
            }
        };

        Ok(Self {
            id: JobId::new(),
            business_id,
            title,
            description: draft.description.trim().to_string(),
            location,
            duration,
            pay: draft.pay,
            pay_type: draft.pay_type,
            skills_required,
            urgency,
            status: JobStatus::Searching,
            matched_worker: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn matched_worker_id(&self) -> Option<WorkerId> {
        self.matched_worker.as_ref().map(|w| w.id)
    }

    /// Expected payout for the whole job.
    ///
    /// Hourly pay is multiplied by the hours read from `duration`, falling
    /// back to a single hour when no number can be found.
    pub fn estimated_earnings(&self) -> f64 {
        match self.pay_type {
            PayType::Hourly => self.pay * duration_hours(&self.duration).unwrap_or(1.0),
            PayType::Daily | PayType::Fixed => self.pay,
        }
    }
}

static HOURS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("hours pattern is valid"));

/// Leading number in a free-text duration such as "4 hours" or "6.5 hrs".
pub fn duration_hours(duration: &str) -> Option<f64> {
    HOURS_REGEX
        .captures(duration)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|h| *h > 0.0)
}
