//! Client configuration.

use std::time::Duration;

use crate::user_agent::UserAgent;

/// Base URL of the public Spiget API.
pub const DEFAULT_BASE_URL: &str = "https://api.spiget.org/v2";

/// Ceiling applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings used to construct a `SpigetClient`.
///
/// Validation (URL syntax, scheme, non-zero timeout) happens in
/// `SpigetClient::new`, so building a config never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: UserAgent,
    /// Extra headers sent with every request.
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: UserAgent::default(),
            headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: UserAgent) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
