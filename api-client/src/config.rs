//! Client configuration
//!
//! Credentials and endpoints are explicit values handed to the client at
//! construction, never ambient globals.

use crate::error::{ApiError, Result};

/// Environment variable holding the API key
pub const KEY_ENV: &str = "DECKHAND_KEY";
/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "DECKHAND_TOKEN";

/// Default versioned API base URL
pub const DEFAULT_BASE_URL: &str = "https://trello.com/1/";
/// Default host for completed export downloads (completion URLs are
/// host-relative paths)
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://trello.com";

/// The static key/token pair attached to every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub key: String,
    pub token: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            token: token.into(),
        }
    }

    /// Load the pair from the environment.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(KEY_ENV)
            .map_err(|_| ApiError::auth(format!("{} is not set", KEY_ENV)))?;
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| ApiError::auth(format!("{} is not set", TOKEN_ENV)))?;
        Ok(Self { key, token })
    }

    /// Resolve credentials from explicit values, falling back to the
    /// environment for whichever half is missing.
    pub fn resolve(key: Option<String>, token: Option<String>) -> Result<Self> {
        if let (Some(key), Some(token)) = (&key, &token) {
            return Ok(Self::new(key, token));
        }
        let env = Self::from_env()?;
        Ok(Self {
            key: key.unwrap_or(env.key),
            token: token.unwrap_or(env.token),
        })
    }
}

/// Everything the client needs to talk to the API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub download_base: String,
    pub credentials: Credentials,
}

impl ApiConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
            credentials,
        }
    }

    /// Override the API base URL. A trailing slash is appended if missing
    /// so endpoint paths can be joined by concatenation.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }
}
