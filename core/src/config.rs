//! Client configuration resolved once at startup.
//!
//! ## Variables
//!
//! - `API_BASE_URL` - backend base URL (required, absolute)
//! - `DEFAULT_API_KEY` - credential used when a call supplies none (optional)

use std::env;
use std::fmt;

use url::Url;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "API_BASE_URL";
pub const DEFAULT_API_KEY_VAR: &str = "DEFAULT_API_KEY";

/// Base URL plus optional default credential.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    base: Url,
    default_api_key: Option<String>,
}

impl ClientConfig {
    /// Validates `base_url` and strips any trailing slash.
    ///
    /// # Errors
    ///
    /// Returns `MissingBaseUrl` for an empty value and `InvalidBaseUrl` when
    /// the value is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
            value: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                value: trimmed.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }
        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            base: parsed,
            default_api_key: None,
        })
    }

    /// Sets the default credential. Empty keys are treated as unset.
    pub fn with_default_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.default_api_key = (!key.is_empty()).then_some(key);
        self
    }

    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR).ok_or(ConfigError::MissingBaseUrl)?;
        let config = Self::new(&base_url)?;
        Ok(match lookup(DEFAULT_API_KEY_VAR) {
            Some(key) => config.with_default_api_key(key),
            None => config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parsed base URL; never cannot-be-a-base.
    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn default_api_key(&self) -> Option<&str> {
        self.default_api_key.as_deref()
    }

    /// Whether callers need to collect a credential themselves.
    pub fn requires_api_key(&self) -> bool {
        self.default_api_key.is_none()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field(
                "default_api_key",
                &self.default_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
