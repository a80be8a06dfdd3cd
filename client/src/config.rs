//! Client settings loaded via OrthoConfig.
//!
//! Values come from `--base-url`/`--users-file` flags, `GLOBALDORM_*`
//! environment variables, or a configuration file, in OrthoConfig's usual
//! precedence. Missing values fall back to the defaults below.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Default room-service base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/GlobalDorm/Dorm";

/// Default credential document, relative to the working directory.
pub const DEFAULT_USERS_FILE: &str = "users.json";

/// Errors raised while interpreting settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL did not parse or cannot carry path segments.
    #[error("invalid base URL '{value}': {reason}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Settings shared by both binaries.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GLOBALDORM")]
pub struct ClientSettings {
    /// Room-service base URL; endpoint paths are appended to it.
    pub base_url: Option<String>,
    /// Path of the JSON credential document.
    pub users_file: Option<PathBuf>,
}

impl ClientSettings {
    /// Parsed base URL, falling back to [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] when the value is not an
    /// absolute, hierarchical URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = Url::parse(raw).map_err(|err| ConfigError::InvalidBaseUrl {
            value: raw.to_owned(),
            reason: err.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                value: raw.to_owned(),
                reason: "URL cannot carry path segments".to_owned(),
            });
        }
        Ok(url)
    }

    /// Credential document path, falling back to [`DEFAULT_USERS_FILE`].
    #[must_use]
    pub fn users_file(&self) -> PathBuf {
        self.users_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE))
    }
}
