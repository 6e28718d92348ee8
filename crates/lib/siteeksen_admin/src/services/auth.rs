//! Authentication service — login/logout flows on top of `siteeksen_core::auth`.

use siteeksen_core::auth::Credentials;
use siteeksen_core::auth::jwt::encode_session;
use siteeksen_core::models::auth::Session;
use tracing::{info, warn};

use crate::AppState;
use crate::error::{AppError, AppResult};

/// Authenticate with phone + password and sign the resulting session.
///
/// Input problems are rejected before any network call. Wrong credentials
/// and identity-service failures both end in [`AppError::InvalidCredentials`].
pub async fn login(state: &AppState, phone: &str, password: &str) -> AppResult<(Session, String)> {
    let credentials = Credentials::new(phone, password, &state.config.phone_country_code)?;

    let session = state
        .issuer
        .issue(&credentials)
        .await
        .ok_or(AppError::InvalidCredentials)?;

    let token = encode_session(&session, state.config.session_secret.as_bytes())?;
    info!(user_id = session.subject(), "admin signed in");
    Ok((session, token))
}

/// Tell the backend the session is over. Failures are logged and ignored;
/// the cookie is cleared regardless.
pub async fn logout(state: &AppState, session: &Session) {
    if let Err(e) = state.api.with_bearer(session.access_token()).logout().await {
        warn!(user_id = session.subject(), error = %e, "upstream logout failed");
    } else {
        info!(user_id = session.subject(), "admin signed out");
    }
}
