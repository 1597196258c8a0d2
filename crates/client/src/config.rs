use std::time::Duration;

use wikift_core::envelope::{SuccessCode, DEFAULT_SUCCESS_CODE};

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint is resolved against. Always ends with `/`.
    pub api_url: String,
    /// OAuth token endpoint used by login.
    pub auth_url: String,
    /// OAuth client credentials sent as HTTP Basic auth on login.
    pub client_id: String,
    pub client_secret: String,
    /// OAuth grant type sent on login (default: `password`).
    pub grant_type: String,
    /// Per-request timeout applied by the HTTP transport.
    pub request_timeout: Duration,
    /// Lifetime of the stored auth token entry.
    pub token_ttl: Duration,
    /// Envelope `code` that marks success.
    pub success_code: SuccessCode,
}

/// Default API base URL.
const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1/";
/// Default OAuth token endpoint.
const DEFAULT_AUTH_URL: &str = "http://localhost:8080/oauth/token";
const DEFAULT_CLIENT_ID: &str = "wikift";
const DEFAULT_CLIENT_SECRET: &str = "wikift-secret";
const DEFAULT_GRANT_TYPE: &str = "password";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// One hour, matching the backend's access token lifetime.
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client_secret: DEFAULT_CLIENT_SECRET.to_string(),
            grant_type: DEFAULT_GRANT_TYPE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            success_code: SuccessCode(DEFAULT_SUCCESS_CODE),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment (after `.env`).
    ///
    /// | Env Var                       | Default                              |
    /// |-------------------------------|--------------------------------------|
    /// | `WIKIFT_API_URL`              | `http://localhost:8080/api/v1/`      |
    /// | `WIKIFT_AUTH_URL`             | `http://localhost:8080/oauth/token`  |
    /// | `WIKIFT_CLIENT_ID`            | `wikift`                             |
    /// | `WIKIFT_CLIENT_SECRET`        | `wikift-secret`                      |
    /// | `WIKIFT_GRANT_TYPE`           | `password`                           |
    /// | `WIKIFT_REQUEST_TIMEOUT_SECS` | `30`                                 |
    /// | `WIKIFT_TOKEN_TTL_SECS`       | `3600`                               |
    /// | `WIKIFT_SUCCESS_CODE`         | `2000`                               |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = normalize_base(
            lookup("WIKIFT_API_URL").unwrap_or(defaults.api_url),
        );
        let auth_url = lookup("WIKIFT_AUTH_URL").unwrap_or(defaults.auth_url);
        let client_id = lookup("WIKIFT_CLIENT_ID").unwrap_or(defaults.client_id);
        let client_secret = lookup("WIKIFT_CLIENT_SECRET").unwrap_or(defaults.client_secret);
        let grant_type = lookup("WIKIFT_GRANT_TYPE").unwrap_or(defaults.grant_type);

        let request_timeout = Duration::from_secs(parse_var(
            &lookup,
            "WIKIFT_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
            "a whole number of seconds",
        )?);
        let token_ttl = Duration::from_secs(parse_var(
            &lookup,
            "WIKIFT_TOKEN_TTL_SECS",
            DEFAULT_TOKEN_TTL_SECS,
            "a whole number of seconds",
        )?);
        let success_code = SuccessCode(parse_var(
            &lookup,
            "WIKIFT_SUCCESS_CODE",
            DEFAULT_SUCCESS_CODE,
            "an integer",
        )?);

        Ok(Self {
            api_url,
            auth_url,
            client_id,
            client_secret,
            grant_type,
            request_timeout,
            token_ttl,
            success_code,
        })
    }

    /// Absolute URL for an endpoint relative to the API base.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_url, endpoint.trim_start_matches('/'))
    }
}

fn normalize_base(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

fn parse_var<F, T>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}
