//! Typed records written through the record store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::UserId;
use crate::identity::validate_email;
use crate::{Error, Result};

/// A record that lives in a known table.
pub trait Record {
    /// Table the record is inserted into.
    const TABLE: &'static str;

    fn validate(&self) -> Result<()>;
}

/// Column that must be unique in `table`, for the tables this crate knows.
pub fn unique_key(table: &str) -> Option<&'static str> {
    match table {
        WaitlistSignup::TABLE => Some("email"),
        BusinessRegistration::TABLE | WorkerRegistration::TABLE => Some("id"),
        _ => None,
    }
}

/// Every table a record store must be able to hold.
pub const TABLES: &[&str] = &[
    WaitlistSignup::TABLE,
    ContactMessage::TABLE,
    BusinessRegistration::TABLE,
    WorkerRegistration::TABLE,
];

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn default_signup_type() -> String {
    "general".to_string()
}

fn default_source() -> String {
    "homepage_cta".to_string()
}

/// A pre-launch waitlist signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistSignup {
    pub email: String,
    #[serde(default = "default_signup_type")]
    pub signup_type: String,
    #[serde(default = "default_source")]
    pub source: String,
}

impl WaitlistSignup {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_lowercase(),
            signup_type: default_signup_type(),
            source: default_source(),
        }
    }
}

impl Record for WaitlistSignup {
    const TABLE: &'static str = "waitlist_signups";

    fn validate(&self) -> Result<()> {
        require("email", &self.email)?;
        validate_email(&self.email)
    }
}

/// A message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Record for ContactMessage {
    const TABLE: &'static str = "contact_messages";

    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("message", &self.message)?;
        validate_email(&self.email)
    }
}

/// Company details captured when a business registers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRegistration {
    /// Account id at the identity provider. Filled in from the session.
    #[serde(default)]
    pub id: UserId,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub company_size: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Record for BusinessRegistration {
    const TABLE: &'static str = "business_registrations";

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("company_name", &self.company_name),
            ("contact_person", &self.contact_person),
            ("phone", &self.phone),
            ("business_type", &self.business_type),
            ("company_size", &self.company_size),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("pincode", &self.pincode),
        ] {
            require(field, value)?;
        }
        validate_email(&self.email)
    }
}

fn default_availability() -> Option<String> {
    Some("Immediate".to_string())
}

/// Personal details captured when a worker registers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRegistration {
    /// Account id at the identity provider. Filled in from the session.
    #[serde(default)]
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub education_level: String,
    #[serde(default = "default_availability")]
    pub availability: Option<String>,
    pub languages: Vec<String>,
    pub has_vehicle: bool,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub aadhar_number: String,
    #[serde(default)]
    pub work_description: Option<String>,
}

impl Record for WorkerRegistration {
    const TABLE: &'static str = "worker_registrations";

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("full_name", &self.full_name),
            ("phone", &self.phone),
            ("gender", &self.gender),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("pincode", &self.pincode),
            ("education_level", &self.education_level),
            ("emergency_contact_name", &self.emergency_contact_name),
            ("emergency_contact_phone", &self.emergency_contact_phone),
            ("aadhar_number", &self.aadhar_number),
        ] {
            require(field, value)?;
        }
        validate_email(&self.email)?;

        if self.skills.iter().all(|s| s.trim().is_empty()) {
            return Err(Error::Validation(
                "please select at least one skill".to_string(),
            ));
        }
        if self.languages.iter().all(|l| l.trim().is_empty()) {
            return Err(Error::Validation(
                "please select at least one language".to_string(),
            ));
        }
        Ok(())
    }
}
