//! Chat relay configuration.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | FANAR_API_URL | unset | Chat backend endpoint. When unset the relay uses mock mode or fails. |
//! | FANAR_API_KEY | unset | Optional bearer credential sent to the endpoint. |
//! | FANAR_MOCK | false | `1` or `true`: echo the last message when no endpoint is set. |
//! | FANAR_TIMEOUT_SECS | 60 | Upper bound for one backend call. |

use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub mock: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            mock: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RelayConfig {
    /// Read the relay settings from the process environment. Blank values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`RelayConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let opt = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        Self {
            api_url: opt("FANAR_API_URL"),
            api_key: opt("FANAR_API_KEY"),
            mock: opt("FANAR_MOCK").is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
            timeout_secs: opt("FANAR_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Mock-only config, handy for local runs and tests.
    pub fn mock() -> Self {
        Self {
            mock: true,
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}
