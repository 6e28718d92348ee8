//! Authentication domain models.
//!
//! Wire shapes of the identity service's `/auth/*` endpoints and the session
//! built from a successful login.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Absolute session lifetime: 7 days.
pub const SESSION_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// Body of `POST /auth/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub phone: &'a str,
    pub password: &'a str,
}

/// Successful `POST /auth/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UpstreamUser,
}

/// User record embedded in the login response.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamUser {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub active_property_id: Option<String>,
}

/// Body of `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Token pair returned by `POST /auth/refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// An authenticated admin session.
///
/// Only built from a successful credential exchange or from a verified
/// session token; there is no public constructor.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) sub: String,
    pub(crate) name: String,
    pub(crate) email: Option<String>,
    pub(crate) phone: String,
    pub(crate) roles: Vec<String>,
    pub(crate) property_id: Option<String>,
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

impl Session {
    /// Build a session from a login response.
    ///
    /// Returns `None` when the identity is incomplete: no user id, no roles,
    /// or a missing token.
    pub(crate) fn from_login(response: LoginResponse, now: DateTime<Utc>) -> Option<Self> {
        let LoginResponse {
            access_token,
            refresh_token,
            user,
        } = response;

        if user.id.is_empty()
            || user.roles.is_empty()
            || access_token.is_empty()
            || refresh_token.is_empty()
        {
            return None;
        }

        let name = format!("{} {}", user.first_name, user.last_name)
            .trim()
            .to_string();

        Some(Self {
            sub: user.id,
            name,
            email: user.email.filter(|e| !e.is_empty()),
            phone: user.phone,
            roles: user.roles,
            property_id: user.active_property_id.filter(|p| !p.is_empty()),
            access_token,
            refresh_token,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(SESSION_MAX_AGE_SECS)).timestamp(),
        })
    }

    /// User id (`sub`).
    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Active property id.
    pub fn property_id(&self) -> Option<&str> {
        self.property_id.as_deref()
    }

    /// Bearer token for the resource API.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Issued-at (unix timestamp).
    pub fn issued_at(&self) -> i64 {
        self.iat
    }

    /// Expiry (unix timestamp).
    pub fn expires_at(&self) -> i64 {
        self.exp
    }

    /// Browser-safe view without the opaque tokens.
    pub fn user(&self) -> SessionUser {
        SessionUser {
            id: self.sub.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            roles: self.roles.clone(),
            property_id: self.property_id.clone(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("sub", &self.sub)
            .field("name", &self.name)
            .field("roles", &self.roles)
            .field("property_id", &self.property_id)
            .field("exp", &self.exp)
            .finish_non_exhaustive()
    }
}

/// Session user as exposed to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    pub roles: Vec<String>,
    pub property_id: Option<String>,
}
