// src/service/config.rs
use std::env;

/// Connection settings for the strategy service, read from the environment
/// once at startup and injected into the client at construction.
///
/// A missing credential does not prevent the application from launching;
/// it fails the first analysis request instead.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Gemini API key. Empty when `GEMINI_API_KEY` is unset.
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: env::var("STRATA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            endpoint: env::var("STRATA_API_BASE")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
        }
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_not_a_credential() {
        assert!(!ServiceConfig::with_api_key("").has_credential());
        assert!(!ServiceConfig::with_api_key("  ").has_credential());
        assert!(ServiceConfig::with_api_key("test-key").has_credential());
    }
}
