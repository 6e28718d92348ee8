//! Session token signing and verification.

use std::path::{Path, PathBuf};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AuthError;
use crate::models::auth::Session;

/// JWT payload of the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    phone: String,
    roles: Vec<String>,
    #[serde(default)]
    property_id: Option<String>,
    access_token: String,
    refresh_token: String,
    iat: i64,
    exp: i64,
}

impl From<&Session> for SessionClaims {
    fn from(s: &Session) -> Self {
        Self {
            sub: s.sub.clone(),
            name: s.name.clone(),
            email: s.email.clone(),
            phone: s.phone.clone(),
            roles: s.roles.clone(),
            property_id: s.property_id.clone(),
            access_token: s.access_token.clone(),
            refresh_token: s.refresh_token.clone(),
            iat: s.iat,
            exp: s.exp,
        }
    }
}

impl From<SessionClaims> for Session {
    fn from(c: SessionClaims) -> Self {
        Self {
            sub: c.sub,
            name: c.name,
            email: c.email,
            phone: c.phone,
            roles: c.roles,
            property_id: c.property_id,
            access_token: c.access_token,
            refresh_token: c.refresh_token,
            iat: c.iat,
            exp: c.exp,
        }
    }
}

/// Sign a session into an HS256 JWT. Expiry is the session's own `exp`.
pub fn encode_session(session: &Session, secret: &[u8]) -> Result<String, AuthError> {
    encode(
        &Header::default(),
        &SessionClaims::from(session),
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify a session token, returning the session on success.
///
/// Bad signatures, malformed payloads, expired tokens and sessions without
/// roles all yield `None`.
pub fn decode_session(token: &str, secret: &[u8]) -> Option<Session> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;
    decode::<SessionClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
        .filter(|claims| !claims.roles.is_empty())
        .map(Session::from)
}

/// Resolve the session signing secret: `SESSION_SECRET` → `NEXTAUTH_SECRET`
/// → persisted file.
pub fn resolve_session_secret() -> String {
    for var in ["SESSION_SECRET", "NEXTAUTH_SECRET"] {
        if let Ok(secret) = std::env::var(var)
            && !secret.is_empty()
        {
            return secret;
        }
    }
    load_or_generate_secret(&session_secret_path())
}

/// Read the secret stored at `path`, generating and persisting a new one if
/// the file is missing or empty.
pub fn load_or_generate_secret(path: &Path) -> String {
    if let Ok(existing) = std::fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(path, &secret);
    info!(path = %path.display(), "generated new session secret");
    secret
}

/// Path to the persisted session secret file.
fn session_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("siteeksen")
        .join("session-secret")
}
