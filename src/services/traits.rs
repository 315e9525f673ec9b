use crate::error::Result;
use crate::models::{Booking, BookingStatus, Envelope, Favorite, User};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Returned by `login` and `register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub location_id: String,
    pub event_date: String,
    pub guests: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Account and session operations
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Envelope<AuthPayload>>;

    async fn register(&self, registration: &Registration) -> Result<Envelope<AuthPayload>>;

    async fn logout(&self) -> Result<Envelope<()>>;

    async fn get_me(&self) -> Result<Envelope<User>>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Envelope<User>>;

    async fn change_password(&self, change: &PasswordChange) -> Result<Envelope<()>>;

    async fn delete_account(&self) -> Result<Envelope<()>>;

    /// Reuse a token obtained earlier, e.g. from a stored session
    async fn use_token(&self, token: Option<String>);
}

#[async_trait]
pub trait BookingService: Send + Sync {
    async fn create(&self, booking: &NewBooking) -> Result<Envelope<Booking>>;

    async fn get_by_id(&self, id: &str) -> Result<Envelope<Booking>>;

    async fn list(&self) -> Result<Envelope<Vec<Booking>>>;

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Envelope<Booking>>;

    async fn cancel(&self, id: &str) -> Result<Envelope<Booking>>;
}

#[async_trait]
pub trait FavoritesService: Send + Sync {
    async fn add(&self, location_id: &str) -> Result<Envelope<Favorite>>;

    async fn remove(&self, location_id: &str) -> Result<Envelope<()>>;

    async fn list(&self) -> Result<Envelope<Vec<Favorite>>>;

    async fn check(&self, location_id: &str) -> Result<Envelope<bool>>;
}
