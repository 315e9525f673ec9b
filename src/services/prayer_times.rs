use crate::config::Config;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Client for the Aladhan prayer-times API
#[derive(Clone)]
pub struct PrayerTimesClient {
    client: Client,
    base_url: String,
}

impl PrayerTimesClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("venue-scout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.prayer_api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn timings_url(&self, date: NaiveDate) -> String {
        format!("{}/timings/{}", self.base_url, date.format("%d-%m-%Y"))
    }

    /// Fetch the timings for `date` at the given coordinates.
    ///
    /// The provider JSON is returned untouched.
    pub async fn fetch_timings(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> Result<serde_json::Value> {
        let url = self.timings_url(date);
        debug!("Fetching prayer times: {} ({}, {})", url, latitude, longitude);

        let response = self
            .client
            .get(&url)
            .query(&[("latitude", latitude), ("longitude", longitude)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Prayer times API returned status: {}", status);
            return Err(Error::rejected(
                status.as_u16(),
                format!("Failed to fetch prayer times: {}", status),
            ));
        }

        let body = response.json::<serde_json::Value>().await?;
        info!("Fetched prayer times for {}", date);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timings_url_uses_day_first_dates() {
        let client = PrayerTimesClient::new(&Config::default()).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            client.timings_url(date),
            "https://api.aladhan.com/v1/timings/07-03-2026"
        );
    }
}
