//! In-memory identity provider.
//!
//! Passwords are kept as HMAC-SHA256 digests keyed by a per-account salt.
//! Sessions live in a map owned by the provider.

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use workbee_core::identity::{validate_email, validate_password};
use workbee_core::{
    Credentials, Error, IdentityProvider, Result, Role, Session, SessionToken, User, UserId,
};

use crate::StoreError;

type HmacSha256 = Hmac<Sha256>;

struct Account {
    user: User,
    salt: [u8; 16],
    /// Hex-encoded digest of the password.
    password_hash: String,
}

fn password_mac(salt: &[u8], password: &str) -> std::result::Result<HmacSha256, StoreError> {
    let mut mac = HmacSha256::new_from_slice(salt).map_err(|e| StoreError::Hash(e.to_string()))?;
    mac.update(password.as_bytes());
    Ok(mac)
}

impl Account {
    fn verify(&self, password: &str) -> Result<bool> {
        let Ok(expected) = hex::decode(&self.password_hash) else {
            return Ok(false);
        };
        let mac = password_mac(&self.salt, password)?;
        Ok(mac.verify_slice(&expected).is_ok())
    }
}

/// Identity provider holding accounts and sessions in memory.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    /// Keyed by normalised email.
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<SessionToken, Session>>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_up(&self, credentials: &Credentials, role: Role) -> Result<User> {
        let email = credentials.normalized_email();
        validate_email(&email)?;
        validate_password(&credentials.password)?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email) {
            return Err(Error::AlreadyRegistered(email));
        }

        let salt = *uuid::Uuid::new_v4().as_bytes();
        let digest = password_mac(&salt, &credentials.password)?.finalize().into_bytes();
        let user = User {
            id: UserId::new(),
            email: email.clone(),
            role,
            created_at: Utc::now(),
        };
        accounts.insert(
            email,
            Account {
                user: user.clone(),
                salt,
                password_hash: hex::encode(digest),
            },
        );

        info!(user_id = %user.id, role = %role, "Account created");
        Ok(user)
    }

    async fn sign_in(&self, credentials: &Credentials, expected_role: Role) -> Result<Session> {
        let email = credentials.normalized_email();
        let user = {
            let accounts = self.accounts.read().await;
            let account = accounts.get(&email).ok_or(Error::InvalidCredentials)?;
            if !account.verify(&credentials.password)? {
                return Err(Error::InvalidCredentials);
            }
            account.user.clone()
        };

        let session = Session {
            token: SessionToken::generate(),
            user,
            created_at: Utc::now(),
        };
        // A wrong role never gets a session.
        session.require_role(expected_role)?;

        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        info!(user_id = %session.user.id, role = %session.role(), "Signed in");
        Ok(session)
    }

    async fn sign_out(&self, token: &SessionToken) -> Result<()> {
        if let Some(session) = self.sessions.write().await.remove(token) {
            debug!(user_id = %session.user.id, "Signed out");
        }
        Ok(())
    }

    async fn get_session(&self, token: &SessionToken) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }
}
