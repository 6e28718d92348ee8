//! Admin server configuration.

use std::fmt;
use std::time::Duration;

use siteeksen_core::auth::jwt::resolve_session_secret;
use siteeksen_core::auth::phone::DEFAULT_COUNTRY_CODE;
use siteeksen_core::client::DEFAULT_API_URL;

/// Default timeout for calls to the identity service and resource API.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Configuration for the admin server.
#[derive(Clone)]
pub struct AdminConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// Base URL of the backend API, including the version prefix.
    pub api_url: String,
    /// HS256 key for session tokens.
    pub session_secret: String,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub cookie_secure: bool,
    /// Country code prefixed to national phone numbers at login.
    pub phone_country_code: String,
    /// Timeout for each outbound request.
    pub upstream_timeout: Duration,
}

impl AdminConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                | Default                                 |
    /// |-------------------------|-----------------------------------------|
    /// | `BIND_ADDR`             | `127.0.0.1:3000`                        |
    /// | `API_URL`               | `http://localhost:8000/api/v1`          |
    /// | `SESSION_SECRET` / `NEXTAUTH_SECRET` | generated & persisted to file |
    /// | `COOKIE_SECURE`         | `false`                                 |
    /// | `PHONE_COUNTRY_CODE`    | `90`                                    |
    /// | `UPSTREAM_TIMEOUT_SECS` | `10`                                    |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into()),
            api_url: std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
            session_secret: resolve_session_secret(),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            phone_country_code: std::env::var("PHONE_COUNTRY_CODE")
                .unwrap_or_else(|_| DEFAULT_COUNTRY_CODE.into()),
            upstream_timeout: Duration::from_secs(
                std::env::var("UPSTREAM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            ),
        }
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("bind_addr", &self.bind_addr)
            .field("api_url", &self.api_url)
            .field("session_secret", &"***")
            .field("cookie_secure", &self.cookie_secure)
            .field("phone_country_code", &self.phone_country_code)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

/// `1`, `true`, `yes` and `on` (any case) are true.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
