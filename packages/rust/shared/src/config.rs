//! Wiki connection configuration.
//!
//! Credentials come from the process environment, optionally seeded from a
//! local `.env` file. Missing values are passed through to the REST client
//! as empty strings and surface as API-level authentication failures — they
//! are deliberately not validated here.

use std::env;

/// Environment variable holding the wiki base URL (e.g. `https://acme.atlassian.net`).
pub const ENV_BASE_URL: &str = "CONFLUENCE_URL";

/// Environment variable holding the account username (usually an email).
pub const ENV_USERNAME: &str = "CONFLUENCE_USERNAME";

/// Environment variable holding the API token.
pub const ENV_API_KEY: &str = "CONFLUENCE_API_KEY";

/// Connection settings for the Confluence REST API.
#[derive(Debug, Clone, Default)]
pub struct WikiConfig {
    /// Base URL of the wiki instance, without a trailing slash.
    pub base_url: String,
    /// Account username for basic auth.
    pub username: String,
    /// API token for basic auth.
    pub api_token: String,
}

impl WikiConfig {
    /// Build a config from explicit values (used by tests and library callers).
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            username: username.into(),
            api_token: api_token.into(),
        }
    }

    /// Read the config from the process environment.
    ///
    /// Unset variables become empty strings; the REST API reports the
    /// resulting authentication failure when the first call is made.
    pub fn from_env() -> Self {
        Self::new(
            env::var(ENV_BASE_URL).unwrap_or_default(),
            env::var(ENV_USERNAME).unwrap_or_default(),
            env::var(ENV_API_KEY).unwrap_or_default(),
        )
    }
}

/// Load a `.env` file from the working directory into the environment,
/// if one exists. Already-set variables are left untouched.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(?path, "loaded .env file"),
        Err(e) if e.not_found() => tracing::debug!("no .env file found"),
        Err(e) => tracing::warn!(error = %e, ".env file could not be read"),
    }
}
