//! Worker profiles used for matching.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::id::WorkerId;
use crate::job::WorkerRef;
use crate::{Error, Result};

/// Read-only view of a worker available for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerProfile {
    pub id: WorkerId,
    pub name: String,
    /// Average rating from 0 to 5.
    pub rating: f32,
    pub completed_jobs: u32,
    pub skills: BTreeSet<String>,
    /// Contact phone number.
    pub phone: String,
}

impl WorkerProfile {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("worker name is required".to_string()));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(Error::Validation(format!(
                "rating {} for {} is outside 0-5",
                self.rating, self.name
            )));
        }
        if self.skills.is_empty() {
            return Err(Error::Validation(format!(
                "worker {} has no skills",
                self.name
            )));
        }
        Ok(())
    }

    /// Whether any of the worker's skills appears in `required`, ignoring case.
    pub fn has_skill_overlap(&self, required: &BTreeSet<String>) -> bool {
        self.skills
            .iter()
            .any(|s| required.iter().any(|r| r.eq_ignore_ascii_case(s)))
    }

    pub fn to_ref(&self) -> WorkerRef {
        WorkerRef {
            id: self.id,
            name: self.name.clone(),
            rating: self.rating,
            phone: self.phone.clone(),
        }
    }
}
