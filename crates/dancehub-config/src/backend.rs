//! REST backend configuration.
//!
//! - `BACKEND_BASE_URL`: Base URL of the REST API (default: `http://localhost:8000/api`)
//! - `BACKEND_TIMEOUT_SECS`: Per-request timeout in seconds (default: 15)

use std::time::Duration;

use crate::env::{parse_or, process_env, string_or};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 15,
        }
    }
}

impl BackendConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_url = string_or(&lookup, "BACKEND_BASE_URL", &defaults.base_url)
            .trim_end_matches('/')
            .to_string();

        Self {
            base_url,
            timeout_secs: parse_or(&lookup, "BACKEND_TIMEOUT_SECS", defaults.timeout_secs).max(1),
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
