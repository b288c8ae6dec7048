use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

use crate::url::DEFAULT_CHAT_BASE_URL;

/// Default model requested when none is configured.
pub const DEFAULT_MODEL: &str = "glm-4.6";

/// Transport configuration for chat API requests.
#[derive(Debug, Clone)]
pub struct ChatApiConfig {
    /// Bearer token passed to `Authorization`.
    pub access_token: String,
    /// Base URL for the chat endpoint.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl Default for ChatApiConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl ChatApiConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// Build a config from `SD_ACCESS_TOKEN`, `SD_BASE_URL` and `SD_MODEL`.
    /// Unset variables fall back to defaults; token validation happens in the
    /// client constructor.
    pub fn from_env() -> Self {
        let mut config = Self::new(env::var("SD_ACCESS_TOKEN").unwrap_or_default());
        if let Ok(base_url) = env::var("SD_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }
        if let Ok(model) = env::var("SD_MODEL") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatApiConfig, DEFAULT_MODEL};
    use crate::url::DEFAULT_CHAT_BASE_URL;

    #[test]
    fn builder_overrides_defaults() {
        let config = ChatApiConfig::new("token")
            .with_base_url("https://example.com/api")
            .with_model("glm-4.5-air")
            .insert_header("x-fe-version", "prod-fe-1.0.57");

        assert_eq!(config.access_token, "token");
        assert_eq!(config.base_url, "https://example.com/api");
        assert_eq!(config.model, "glm-4.5-air");
        assert_eq!(
            config.extra_headers.get("x-fe-version").map(String::as_str),
            Some("prod-fe-1.0.57")
        );
    }

    #[test]
    fn defaults_point_at_the_public_endpoint() {
        let config = ChatApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_CHAT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.timeout.is_none());
    }
}
