use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Booking, BookingStatus, Envelope, Favorite, User};
use crate::services::traits::{
    AuthPayload, AuthService, BookingService, Credentials, FavoritesService, NewBooking,
    PasswordChange, ProfileUpdate, Registration,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// REST client for the marketplace API, implementing every service trait
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.api_base_url, config)
    }

    pub fn with_base_url(base_url: &str, config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("venue-scout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Envelope<T>> {
        let response = self.authorized(builder).await.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
            warn!("API returned status {}: {}", status, message);

            return Err(if status == StatusCode::NOT_FOUND {
                Error::NotFound(message)
            } else {
                Error::rejected(status.as_u16(), message)
            });
        }

        let body = response.text().await?;
        decode_envelope(&body)
    }

    async fn store_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }
}

/// Decode a 2xx body. An empty body or one without `data` decodes when `T`
/// accepts `null`, which covers `Envelope<()>` on 204 and message-only replies.
fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>> {
    let mut value: serde_json::Value = if body.trim().is_empty() {
        json!({})
    } else {
        serde_json::from_str(body)?
    };
    if let Some(object) = value.as_object_mut() {
        object.entry("data").or_insert(serde_json::Value::Null);
    }
    Ok(serde_json::from_value(value)?)
}

/// Human-readable message from an error body: `{"message"}` or `{"error":{"message"}}`
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value["message"]
        .as_str()
        .or_else(|| value["error"]["message"].as_str())
        .or_else(|| value["error"].as_str())
        .map(str::to_string)
}

fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[async_trait]
impl AuthService for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<Envelope<AuthPayload>> {
        debug!("Logging in {}", credentials.email);
        let envelope: Envelope<AuthPayload> = self
            .send(self.client.post(self.url("auth/login")).json(credentials))
            .await?;
        self.store_token(Some(envelope.data.token.clone())).await;
        info!("Logged in as {}", envelope.data.user.email);
        Ok(envelope)
    }

    async fn register(&self, registration: &Registration) -> Result<Envelope<AuthPayload>> {
        let envelope: Envelope<AuthPayload> = self
            .send(self.client.post(self.url("auth/register")).json(registration))
            .await?;
        self.store_token(Some(envelope.data.token.clone())).await;
        info!("Registered {}", envelope.data.user.email);
        Ok(envelope)
    }

    async fn logout(&self) -> Result<Envelope<()>> {
        let result = self.send(self.client.post(self.url("auth/logout"))).await;
        // the local token goes away even if the server call failed
        self.store_token(None).await;
        result
    }

    async fn get_me(&self) -> Result<Envelope<User>> {
        self.send(self.client.get(self.url("auth/me"))).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Envelope<User>> {
        self.send(self.client.put(self.url("auth/profile")).json(update))
            .await
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<Envelope<()>> {
        self.send(self.client.put(self.url("auth/password")).json(change))
            .await
    }

    async fn delete_account(&self) -> Result<Envelope<()>> {
        let result = self.send(self.client.delete(self.url("auth/account"))).await;
        // an unreadable 2xx body still means the account is gone
        if matches!(result, Ok(_) | Err(Error::Serialization(_))) {
            self.store_token(None).await;
        }
        result
    }

    async fn use_token(&self, token: Option<String>) {
        self.store_token(token).await;
    }
}

#[async_trait]
impl BookingService for ApiClient {
    async fn create(&self, booking: &NewBooking) -> Result<Envelope<Booking>> {
        debug!("Creating booking for {} on {}", booking.location_id, booking.event_date);
        self.send(self.client.post(self.url("bookings")).json(booking))
            .await
    }

    async fn get_by_id(&self, id: &str) -> Result<Envelope<Booking>> {
        self.send(self.client.get(self.url(&format!("bookings/{}", segment(id)))))
            .await
    }

    async fn list(&self) -> Result<Envelope<Vec<Booking>>> {
        self.send(self.client.get(self.url("bookings"))).await
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Envelope<Booking>> {
        self.send(
            self.client
                .patch(self.url(&format!("bookings/{}/status", segment(id))))
                .json(&json!({ "status": status })),
        )
        .await
    }

    async fn cancel(&self, id: &str) -> Result<Envelope<Booking>> {
        self.send(self.client.post(self.url(&format!("bookings/{}/cancel", segment(id)))))
            .await
    }
}

#[async_trait]
impl FavoritesService for ApiClient {
    async fn add(&self, location_id: &str) -> Result<Envelope<Favorite>> {
        self.send(
            self.client
                .post(self.url("favorites"))
                .json(&json!({ "locationId": location_id })),
        )
        .await
    }

    async fn remove(&self, location_id: &str) -> Result<Envelope<()>> {
        self.send(self.client.delete(self.url(&format!("favorites/{}", segment(location_id)))))
            .await
    }

    async fn list(&self) -> Result<Envelope<Vec<Favorite>>> {
        self.send(self.client.get(self.url("favorites"))).await
    }

    async fn check(&self, location_id: &str) -> Result<Envelope<bool>> {
        self.send(self.client.get(self.url(&format!("favorites/{}", segment(location_id)))))
            .await
    }
}
