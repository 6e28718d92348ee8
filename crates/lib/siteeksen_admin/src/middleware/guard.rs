//! Route guard — session cookie verification and redirect policy.
//!
//! Runs before every handler. Only the cookie's signature and expiry are
//! checked; the identity service is never contacted here, so a session
//! revoked upstream stays valid until it expires.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use siteeksen_core::auth::jwt::decode_session;
use siteeksen_core::models::auth::Session;
use tracing::debug;

use crate::AppState;
use crate::services::cookies::SESSION_COOKIE;

/// Login page.
pub const LOGIN_PATH: &str = "/login";
/// Protected area root and post-login landing page.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Decoded session, stored in request extensions for protected handlers.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Login,
    Protected,
    Unguarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    PassThrough,
    RedirectToLogin,
    RedirectToDashboard,
}

fn is_under(path: &str, root: &str) -> bool {
    path.strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

pub fn classify_path(path: &str) -> PathClass {
    if is_under(path, LOGIN_PATH) {
        PathClass::Login
    } else if is_under(path, DASHBOARD_PATH) {
        PathClass::Protected
    } else {
        PathClass::Unguarded
    }
}

/// Redirect policy. Pure, so the same inputs always give the same answer.
pub fn guard_decision(path: &str, has_session: bool) -> GuardDecision {
    match (classify_path(path), has_session) {
        (PathClass::Login, true) => GuardDecision::RedirectToDashboard,
        (PathClass::Protected, false) => GuardDecision::RedirectToLogin,
        _ => GuardDecision::PassThrough,
    }
}

/// Decode the session cookie, if any. Invalid or expired tokens count as
/// no session.
pub fn session_from_jar(jar: &CookieJar, secret: &[u8]) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;
    decode_session(cookie.value(), secret)
}

/// Axum middleware: applies [`guard_decision`] and injects [`CurrentSession`]
/// into request extensions when a valid session is present.
pub async fn route_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = session_from_jar(&jar, state.config.session_secret.as_bytes());
    let path = request.uri().path();

    match guard_decision(path, session.is_some()) {
        GuardDecision::RedirectToLogin => {
            debug!(path, "no valid session, redirecting to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
        GuardDecision::RedirectToDashboard => {
            debug!(path, "already signed in, redirecting to dashboard");
            Redirect::to(DASHBOARD_PATH).into_response()
        }
        GuardDecision::PassThrough => {
            if let Some(session) = session {
                request.extensions_mut().insert(CurrentSession(session));
            }
            next.run(request).await
        }
    }
}
