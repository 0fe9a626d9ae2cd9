use crate::{env_optional, env_or_default, ConfigError, FromEnv};
use std::time::Duration;

pub const DEFAULT_TASKS_API_URL: &str = "http://localhost:4000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Endpoints of the remote task service, resolved once at startup
#[derive(Clone, Debug)]
pub struct TaskApiConfig {
    /// REST base, including the `/api` prefix
    pub base_url: String,
    /// Live-update endpoint; `None` disables event forwarding
    pub live_updates_url: Option<String>,
    pub timeout: Duration,
}

impl TaskApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_trailing_slash(base_url.into()),
            ..Self::default()
        }
    }

    pub fn with_live_updates(mut self, url: impl Into<String>) -> Self {
        self.live_updates_url = Some(trim_trailing_slash(url.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

impl FromEnv for TaskApiConfig {
    /// Reads from environment variables:
    /// - TASKS_API_URL: defaults to http://localhost:4000/api
    /// - TASKS_API_TIMEOUT_SECS: defaults to 10
    /// - LIVE_UPDATES_URL: optional
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("TASKS_API_URL", DEFAULT_TASKS_API_URL);
        let timeout_secs: u64 = env_or_default(
            "TASKS_API_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse()
        .map_err(|e| ConfigError::ParseError {
            key: "TASKS_API_TIMEOUT_SECS".to_string(),
            details: format!("{}", e),
        })?;

        Ok(Self {
            base_url: trim_trailing_slash(base_url),
            live_updates_url: env_optional("LIVE_UPDATES_URL").map(trim_trailing_slash),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for TaskApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TASKS_API_URL.to_string(),
            live_updates_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
