use crate::error::{Error, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PRAYER_API_BASE_URL: &str = "https://api.aladhan.com/v1";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Runtime settings, read from `VENUE_SCOUT_*` environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub prayer_api_base_url: String,
    pub page_size: usize,
    pub http_timeout: Duration,
    pub session_ttl: chrono::Duration,
    pub session_store: PathBuf,
    pub dedupe_features: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            prayer_api_base_url: DEFAULT_PRAYER_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            http_timeout: Duration::from_secs(30),
            session_ttl: chrono::Duration::hours(24),
            session_store: PathBuf::from("venue_scout_session.json"),
            dedupe_features: false,
        }
    }
}

impl Config {
    /// Load from the process environment (after `dotenv`)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup("VENUE_SCOUT_API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("VENUE_SCOUT_PRAYER_API_BASE_URL") {
            config.prayer_api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(size) = parse_var::<usize>(&lookup, "VENUE_SCOUT_PAGE_SIZE")? {
            if size == 0 {
                return Err(Error::Config(
                    "VENUE_SCOUT_PAGE_SIZE must be greater than zero".to_string(),
                ));
            }
            config.page_size = size;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "VENUE_SCOUT_HTTP_TIMEOUT_SECS")? {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(hours) = parse_var::<i64>(&lookup, "VENUE_SCOUT_SESSION_TTL_HOURS")? {
            config.session_ttl = chrono::Duration::hours(hours);
        }
        if let Some(path) = lookup("VENUE_SCOUT_SESSION_STORE") {
            config.session_store = PathBuf::from(path);
        }
        if let Some(flag) = parse_var::<bool>(&lookup, "VENUE_SCOUT_DEDUPE_FEATURES")? {
            config.dedupe_features = flag;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("invalid value for {}: {:?}", key, raw))),
    }
}
