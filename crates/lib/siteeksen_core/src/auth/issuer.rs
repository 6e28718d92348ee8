//! Session issuer — exchanges credentials with the identity service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::Credentials;
use crate::client::{ApiClient, ApiResult};
use crate::models::auth::{LoginRequest, LoginResponse, Session};

/// Why a credential exchange failed. Logged, never shown to the user.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("identity service rejected the login with status {0}")]
    Rejected(u16),

    #[error("identity service unreachable: {0}")]
    Transport(String),

    #[error("identity service returned a malformed body: {0}")]
    Malformed(String),
}

/// External service that verifies a phone + password pair.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Perform exactly one credential exchange.
    async fn exchange(&self, request: &LoginRequest<'_>) -> Result<LoginResponse, ExchangeError>;
}

/// [`IdentityProvider`] calling `POST {api_url}/auth/login`.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    login_url: Url,
}

impl HttpIdentityProvider {
    /// Share the resource API client's transport and base URL.
    pub fn new(api: &ApiClient) -> ApiResult<Self> {
        Ok(Self {
            http: api.http().clone(),
            login_url: api.endpoint(&["auth", "login"])?,
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn exchange(&self, request: &LoginRequest<'_>) -> Result<LoginResponse, ExchangeError> {
        let resp = self
            .http
            .post(self.login_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExchangeError::Rejected(status.as_u16()));
        }

        resp.json::<LoginResponse>()
            .await
            .map_err(|e| ExchangeError::Malformed(e.without_url().to_string()))
    }
}

/// Turns credentials into sessions.
///
/// Every failure (wrong credentials, unreachable service, bad status,
/// malformed body) collapses into `None` so callers cannot tell them apart.
/// No retries.
#[derive(Clone)]
pub struct SessionIssuer {
    provider: Arc<dyn IdentityProvider>,
}

impl SessionIssuer {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Exchange `credentials` for a session.
    pub async fn issue(&self, credentials: &Credentials) -> Option<Session> {
        let request = LoginRequest {
            phone: credentials.phone(),
            password: credentials.password(),
        };

        let response = match self.provider.exchange(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "credential exchange failed");
                return None;
            }
        };

        let session = Session::from_login(response, Utc::now());
        match &session {
            Some(s) => debug!(user_id = s.subject(), roles = ?s.roles(), "session issued"),
            None => warn!("credential exchange returned an incomplete identity"),
        }
        session
    }
}
