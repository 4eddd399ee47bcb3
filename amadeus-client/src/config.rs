use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use skyfare_core::ProviderError;

pub const API_KEY_ENV_VAR: &str = "AMADEUS_API_KEY";
pub const API_SECRET_ENV_VAR: &str = "AMADEUS_API_SECRET";

pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmadeusConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Falls back to `AMADEUS_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Falls back to `AMADEUS_API_SECRET`
    #[serde(default)]
    pub api_secret: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `page[limit]` sent with location lookups
    #[serde(default = "default_location_page_limit")]
    pub location_page_limit: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_location_page_limit() -> u32 {
    20
}

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_secret: None,
            timeout_secs: default_timeout_secs(),
            location_page_limit: default_location_page_limit(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl AmadeusConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Credentials from the config, falling back to the environment.
    pub fn credentials(&self) -> Result<Credentials, ProviderError> {
        self.credentials_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn credentials_with<F>(&self, lookup: F) -> Result<Credentials, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |configured: &Option<String>, env_var: &str| {
            configured
                .clone()
                .or_else(|| lookup(env_var))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ProviderError::Auth(format!("{env_var} is not set")))
        };
        Ok(Credentials {
            api_key: resolve(&self.api_key, API_KEY_ENV_VAR)?,
            api_secret: resolve(&self.api_secret, API_SECRET_ENV_VAR)?,
        })
    }
}
