//! Identity provider abstraction.
//!
//! Accounts are keyed by email and password and carry a role. The role is
//! parsed into [`Role`] once, when a session is loaded; callers never look
//! at raw user metadata.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::id::UserId;
use crate::{Error, Result};

/// Metadata key under which the role is stored with the account.
pub const ROLE_METADATA_KEY: &str = "user_type";

/// Which side of the marketplace an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[display("business")]
    Business,
    #[display("worker")]
    Worker,
}

impl std::str::FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "business" => Ok(Role::Business),
            "worker" => Ok(Role::Worker),
            other => Err(Error::Unauthorized(format!("unknown account role: {}", other))),
        }
    }
}

impl Role {
    /// Read the role out of account metadata.
    pub fn from_metadata(metadata: &serde_json::Value) -> Result<Self> {
        metadata
            .get(ROLE_METADATA_KEY)
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Unauthorized("account has no role".to_string()))?
            .parse()
    }

    pub fn to_metadata(self) -> serde_json::Value {
        serde_json::json!({ ROLE_METADATA_KEY: self.to_string() })
    }
}

/// Email and password pair.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Email trimmed and lowercased, the form accounts are keyed by.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// An account at the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Opaque bearer token identifying a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct SessionToken(String);

impl SessionToken {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: SessionToken,
    pub user: User,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Fail unless the session belongs to an account with `role`.
    pub fn require_role(&self, role: Role) -> Result<()> {
        if self.user.role != role {
            return Err(Error::Forbidden(format!(
                "this account is registered as a {}, not a {}",
                self.user.role, role
            )));
        }
        Ok(())
    }
}

/// Trait for identity provider backends.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account. Fails with `AlreadyRegistered` for a known email.
    async fn sign_up(&self, credentials: &Credentials, role: Role) -> Result<User>;

    /// Open a session. `expected_role` must match the account's role.
    async fn sign_in(&self, credentials: &Credentials, expected_role: Role) -> Result<Session>;

    /// End a session. Unknown tokens are ignored.
    async fn sign_out(&self, token: &SessionToken) -> Result<()>;

    /// Look up a live session.
    async fn get_session(&self, token: &SessionToken) -> Result<Option<Session>>;
}

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

static SPECIAL_CHAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("special character pattern is valid")
});

pub fn validate_email(email: &str) -> Result<()> {
    if !EMAIL_REGEX.is_match(email.trim()) {
        return Err(Error::Validation(format!("invalid email address: {}", email)));
    }
    Ok(())
}

/// Password policy for new accounts.
pub fn validate_password(password: &str) -> Result<()> {
    let fail = |msg: &str| Err(Error::Validation(msg.to_string()));

    if password.chars().count() < 8 {
        return fail("password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return fail("password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return fail("password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return fail("password must contain at least one number");
    }
    if !SPECIAL_CHAR_REGEX.is_match(password) {
        return fail("password must contain at least one special character");
    }
    Ok(())
}
