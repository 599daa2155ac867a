//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `PAPERBACK_DATA_DIR` - Directory for the persistent local store
//!   (default: `./data`)
//! - `PAPERBACK_FIXTURE_URL` - Base URL of the fixture endpoints
//!   (default: `http://localhost:3000/api/`)
//! - `PAPERBACK_HYDRATION` - Hydration policy, `local-first` or `remote`
//!   (default: `local-first`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use paperback_catalog::HydrationPolicy;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted collection files.
    pub data_dir: PathBuf,
    /// Base URL the fixture endpoints are joined under.
    pub fixture_url: Url,
    /// Policy applied when fixture data meets local data.
    pub hydration: HydrationPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("PAPERBACK_DATA_DIR", "./data"));

        let fixture_url = normalize_base_url(&get_env_or_default(
            "PAPERBACK_FIXTURE_URL",
            "http://localhost:3000/api/",
        ))
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar("PAPERBACK_FIXTURE_URL".to_string(), e.to_string()))?;

        let hydration = get_env_or_default("PAPERBACK_HYDRATION", "local-first")
            .parse::<HydrationPolicy>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PAPERBACK_HYDRATION".to_string(), e.to_string())
            })?;

        Ok(Self {
            data_dir,
            fixture_url,
            hydration,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Endpoint paths join under the base URL, so it must end with a slash.
fn normalize_base_url(raw: &str) -> String {
    if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:3000/api"),
            "http://localhost:3000/api/"
        );
        assert_eq!(
            normalize_base_url("http://localhost:3000/api/"),
            "http://localhost:3000/api/"
        );
    }

    #[test]
    fn test_base_url_joins_endpoints() {
        let url: Url = normalize_base_url("http://localhost:3000/api")
            .parse()
            .unwrap();
        assert_eq!(
            url.join("books.json").unwrap().as_str(),
            "http://localhost:3000/api/books.json"
        );
    }
}
