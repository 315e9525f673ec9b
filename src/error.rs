use thiserror::Error;

/// Errors surfaced by the service layer.
///
/// Malformed search input never ends up here: the codec and the extractors
/// coerce it to defaults instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure or timeout
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered but refused the request
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// The owning resource was cancelled before the call resolved
    #[error("Request cancelled")]
    Cancelled,

    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Local (de)serialization, or a successful response whose body does not decode
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Error::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Whether the provider rejected the credentials or the session token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Rejected { status: 401 | 403, .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_is_the_provider_message() {
        let error = Error::rejected(422, "Email already registered");
        assert_eq!(error.to_string(), "Email already registered");
    }

    #[test]
    fn test_not_found_display() {
        let error = Error::NotFound("booking b-1".to_string());
        assert_eq!(error.to_string(), "Not found: booking b-1");
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(Error::rejected(401, "expired").is_unauthorized());
        assert!(Error::rejected(403, "forbidden").is_unauthorized());
        assert!(!Error::rejected(400, "bad").is_unauthorized());
        assert!(!Error::Cancelled.is_unauthorized());
    }
}
