use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Mutex;
use venue_scout::models::{Envelope, Role, User};
use venue_scout::services::session::{FileSessionStore, Session, SessionManager, SessionStore};
use venue_scout::services::traits::{
    AuthPayload, AuthService, Credentials, PasswordChange, ProfileUpdate, Registration,
};
use venue_scout::{Error, Result};

/// Auth double: `me` decides what `get_me` answers
struct FakeAuth {
    role: Role,
    me: Mutex<std::result::Result<String, (u16, String)>>,
    token: Mutex<Option<String>>,
}

impl FakeAuth {
    fn new(role: Role) -> Self {
        Self {
            role,
            me: Mutex::new(Ok("admin@venue.tn".to_string())),
            token: Mutex::new(None),
        }
    }

    fn rejecting(role: Role, status: u16) -> Self {
        let auth = Self::new(role);
        *auth.me.lock().unwrap() = Err((status, "Token expired".to_string()));
        auth
    }

    fn user(&self, email: &str) -> User {
        User {
            id: "u-1".to_string(),
            email: email.to_string(),
            name: None,
            phone: None,
            role: self.role,
        }
    }
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn login(&self, credentials: &Credentials) -> Result<Envelope<AuthPayload>> {
        *self.token.lock().unwrap() = Some("tok-1".to_string());
        Ok(Envelope::new(AuthPayload {
            user: self.user(&credentials.email),
            token: "tok-1".to_string(),
        }))
    }

    async fn register(&self, _registration: &Registration) -> Result<Envelope<AuthPayload>> {
        unimplemented!()
    }

    async fn logout(&self) -> Result<Envelope<()>> {
        *self.token.lock().unwrap() = None;
        Ok(Envelope::new(()))
    }

    async fn get_me(&self) -> Result<Envelope<User>> {
        if self.token.lock().unwrap().is_none() {
            return Err(Error::rejected(401, "Missing token"));
        }
        let me = self.me.lock().unwrap().clone();
        match me {
            Ok(email) => Ok(Envelope::new(self.user(&email))),
            Err((status, message)) => Err(Error::rejected(status, message)),
        }
    }

    async fn update_profile(&self, _update: &ProfileUpdate) -> Result<Envelope<User>> {
        unimplemented!()
    }

    async fn change_password(&self, _change: &PasswordChange) -> Result<Envelope<()>> {
        unimplemented!()
    }

    async fn delete_account(&self) -> Result<Envelope<()>> {
        unimplemented!()
    }

    async fn use_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}

fn credentials() -> Credentials {
    Credentials {
        email: "admin@venue.tn".to_string(),
        password: "pw".to_string(),
    }
}

#[tokio::test]
async fn test_file_store_round_trip_keyed_by_email() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("nested/session.json"));

    assert!(store.load("admin@venue.tn").await.unwrap().is_none());

    let session = Session::new("Admin@Venue.tn", "tok", true, Duration::hours(1));
    store.save(&session).await.unwrap();

    let loaded = store.load("admin@venue.tn").await.unwrap();
    assert_eq!(loaded, Some(session));

    let raw = std::fs::read_to_string(dir.path().join("nested/session.json")).unwrap();
    assert!(raw.contains("venue_scout.admin_session"));

    store.remove("ADMIN@venue.tn").await.unwrap();
    assert!(store.load("admin@venue.tn").await.unwrap().is_none());
}

#[tokio::test]
async fn test_sign_in_then_restore_validates_with_server() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));
    let manager = SessionManager::new(FakeAuth::new(Role::Admin), store, Duration::hours(4));

    let session = manager.sign_in(&credentials()).await.unwrap();
    assert!(session.is_admin);

    // a fresh process has no token until the stored one is reused
    manager.auth().use_token(None).await;

    let restored = manager.restore("admin@venue.tn").await.unwrap();
    assert_eq!(restored.map(|s| s.token), Some("tok-1".to_string()));
    assert!(manager.is_admin("admin@venue.tn").await.unwrap());
}

#[tokio::test]
async fn test_expired_session_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));

    let mut stale = Session::new("admin@venue.tn", "tok-1", true, Duration::hours(1));
    stale.expires_at = Utc::now() - Duration::minutes(1);
    store.save(&stale).await.unwrap();

    let manager = SessionManager::new(FakeAuth::new(Role::Admin), store.clone(), Duration::hours(1));

    assert!(manager.restore("admin@venue.tn").await.unwrap().is_none());
    assert!(store.load("admin@venue.tn").await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_rejected_session_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));
    store
        .save(&Session::new("admin@venue.tn", "tok-1", true, Duration::hours(1)))
        .await
        .unwrap();

    let manager = SessionManager::new(FakeAuth::rejecting(Role::Admin, 401), store.clone(), Duration::hours(1));

    assert!(!manager.is_admin("admin@venue.tn").await.unwrap());
    assert!(store.load("admin@venue.tn").await.unwrap().is_none());
}

#[tokio::test]
async fn test_unverifiable_session_propagates_error_and_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));
    store
        .save(&Session::new("admin@venue.tn", "tok-1", true, Duration::hours(1)))
        .await
        .unwrap();

    let manager = SessionManager::new(FakeAuth::rejecting(Role::Admin, 502), store.clone(), Duration::hours(1));

    let err = manager.restore("admin@venue.tn").await.unwrap_err();
    assert!(matches!(err, Error::Rejected { status: 502, .. }));
    assert!(store.load("admin@venue.tn").await.unwrap().is_some());
}

#[tokio::test]
async fn test_demoted_user_loses_admin_flag() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));
    store
        .save(&Session::new("admin@venue.tn", "tok-1", true, Duration::hours(1)))
        .await
        .unwrap();

    let manager = SessionManager::new(FakeAuth::new(Role::User), store.clone(), Duration::hours(1));

    let restored = manager.restore("admin@venue.tn").await.unwrap().unwrap();
    assert!(!restored.is_admin);
    assert!(!store.load("admin@venue.tn").await.unwrap().unwrap().is_admin);
}

#[tokio::test]
async fn test_sign_out_removes_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));
    let manager = SessionManager::new(FakeAuth::new(Role::Admin), store.clone(), Duration::hours(1));

    manager.sign_in(&credentials()).await.unwrap();
    manager.sign_out("admin@venue.tn").await.unwrap();

    assert!(store.load("admin@venue.tn").await.unwrap().is_none());
}
