//! Client configuration: application credentials and transport settings.
//!
//! There is no config file. Values come from the constructor or, for
//! convenience, from `UNTAPPD_*` environment variables.

use std::time::Duration;

use crate::error::ApiError;

/// Production API root. Endpoint paths are appended verbatim.
pub const DEFAULT_BASE_URL: &str = "https://api.untappd.com/v4/";

pub const CLIENT_ID_ENV: &str = "UNTAPPD_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "UNTAPPD_CLIENT_SECRET";
pub const ACCESS_TOKEN_ENV: &str = "UNTAPPD_ACCESS_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application credentials issued by Untappd. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Reads `UNTAPPD_CLIENT_ID` and `UNTAPPD_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(require_env(CLIENT_ID_ENV)?, require_env(CLIENT_SECRET_ENV)?))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

// Keep the secret out of debug output and therefore out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Transport-level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, always ending in exactly one `/`.
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("untappd-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Points the client at another API root, e.g. a local fake.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = format!("{}/", base_url.trim_end_matches('/'));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Reads an optional variable, treating an empty value as unset.
pub(crate) fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn require_env(name: &str) -> Result<String, ApiError> {
    optional_env(name).ok_or_else(|| ApiError::Config(format!("{name} is not set")))
}
