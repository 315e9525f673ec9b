//! Persisted admin session.
//!
//! A stored session is never trusted on its own: it must be unexpired and
//! the auth service must still recognise its token as an admin account.

use crate::error::{Error, Result};
use crate::models::Role;
use crate::services::traits::{AuthService, Credentials};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Fixed key under which admin sessions are stored
pub const ADMIN_SESSION_KEY: &str = "venue_scout.admin_session";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub token: String,
    pub is_admin: bool,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(email: impl Into<String>, token: impl Into<String>, is_admin: bool, ttl: Duration) -> Self {
        let issued_at = Utc::now();
        Self {
            email: email.into(),
            token: token.into(),
            is_admin,
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Where sessions live between runs, keyed by e-mail
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, email: &str) -> Result<Option<Session>>;

    async fn save(&self, session: &Session) -> Result<()>;

    async fn remove(&self, email: &str) -> Result<()>;
}

type StoreFile = HashMap<String, HashMap<String, Session>>;

/// JSON file store: `{ "venue_scout.admin_session": { "<email>": Session } }`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Result<StoreFile> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(StoreFile::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreFile::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, file: &StoreFile) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(file)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

fn store_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, email: &str) -> Result<Option<Session>> {
        let file = self.read_all().await?;
        Ok(file
            .get(ADMIN_SESSION_KEY)
            .and_then(|sessions| sessions.get(&store_key(email)))
            .cloned())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let mut file = self.read_all().await?;
        file.entry(ADMIN_SESSION_KEY.to_string())
            .or_default()
            .insert(store_key(&session.email), session.clone());
        self.write_all(&file).await
    }

    async fn remove(&self, email: &str) -> Result<()> {
        let mut file = self.read_all().await?;
        let removed = file
            .get_mut(ADMIN_SESSION_KEY)
            .and_then(|sessions| sessions.remove(&store_key(email)))
            .is_some();
        if removed {
            self.write_all(&file).await?;
        }
        Ok(())
    }
}

/// Signs users in, persists their session and re-validates stored ones
pub struct SessionManager<A, S> {
    auth: A,
    store: S,
    ttl: Duration,
}

impl<A: AuthService, S: SessionStore> SessionManager<A, S> {
    pub fn new(auth: A, store: S, ttl: Duration) -> Self {
        Self { auth, store, ttl }
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let payload = self.auth.login(credentials).await?.data;
        let session = Session::new(
            payload.user.email,
            payload.token,
            payload.user.role == Role::Admin,
            self.ttl,
        );
        self.store.save(&session).await?;
        info!("Session stored for {} (admin: {})", session.email, session.is_admin);
        Ok(session)
    }

    /// Bring back a stored session, or `None` if there is nothing usable.
    ///
    /// Expired and server-rejected sessions are deleted from the store.
    /// Transport failures propagate: an unverifiable session is not used.
    pub async fn restore(&self, email: &str) -> Result<Option<Session>> {
        let Some(mut session) = self.store.load(email).await? else {
            debug!("No stored session for {}", email);
            return Ok(None);
        };

        if session.is_expired() {
            warn!("Stored session for {} expired at {}", email, session.expires_at);
            self.store.remove(email).await?;
            return Ok(None);
        }

        self.auth.use_token(Some(session.token.clone())).await;
        let user = match self.auth.get_me().await {
            Ok(envelope) => envelope.data,
            Err(e) if e.is_unauthorized() || matches!(e, Error::NotFound(_)) => {
                warn!("Stored session for {} rejected: {}", email, e);
                self.auth.use_token(None).await;
                self.store.remove(email).await?;
                return Ok(None);
            }
            Err(e) => {
                self.auth.use_token(None).await;
                return Err(e);
            }
        };

        if !user.email.eq_ignore_ascii_case(&session.email) {
            warn!("Stored session for {} belongs to {}", email, user.email);
            self.auth.use_token(None).await;
            self.store.remove(email).await?;
            return Ok(None);
        }

        let is_admin = user.role == Role::Admin;
        if session.is_admin != is_admin {
            session.is_admin = is_admin;
            self.store.save(&session).await?;
        }

        Ok(Some(session))
    }

    /// Whether `email` currently holds a valid admin session
    pub async fn is_admin(&self, email: &str) -> Result<bool> {
        Ok(self
            .restore(email)
            .await?
            .map(|session| session.is_admin)
            .unwrap_or(false))
    }

    pub async fn sign_out(&self, email: &str) -> Result<()> {
        if let Err(e) = self.auth.logout().await {
            warn!("Logout call failed for {}: {}", email, e);
        }
        self.store.remove(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry() {
        let session = Session::new("a@b.tn", "t", true, Duration::hours(1));
        assert!(!session.is_expired());
        assert!(session.is_expired_at(session.issued_at + Duration::hours(1)));
        assert!(!session.is_expired_at(session.issued_at + Duration::minutes(59)));
    }

    #[test]
    fn test_store_key_normalises_email() {
        assert_eq!(store_key("  Admin@Venue.TN "), "admin@venue.tn");
    }
}
