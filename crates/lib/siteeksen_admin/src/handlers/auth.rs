//! Login, logout and session request handlers.

use axum::Json;
use axum::extract::{Form, FromRequest, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use siteeksen_core::models::auth::SessionUser;

use crate::AppState;
use crate::error::{AppError, AppResult, INVALID_CREDENTIALS_MESSAGE};
use crate::middleware::guard::{DASHBOARD_PATH, LOGIN_PATH, session_from_jar};
use crate::models::LoginSuccess;
use crate::services::auth;
use crate::services::cookies::{clear_session_cookie, session_cookie};

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="tr">
<head><meta charset="utf-8"><title>SiteEksen · Yönetim Paneli</title></head>
<body>
<!--error-->
<form method="post" action="/login">
  <label>Telefon Numarası <input name="phone" type="tel" placeholder="5551234567" required></label>
  <label>Şifre <input name="password" type="password" required></label>
  <button type="submit">Giriş Yap</button>
</form>
</body>
</html>
"#;

/// `POST /login` body. Missing fields deserialize as empty and are rejected
/// by credential validation.
#[derive(Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

/// Login body accepted as JSON or as an HTML form post.
pub struct LoginForm {
    pub body: LoginRequest,
    pub is_json: bool,
}

impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let body = if is_json {
            Json::<LoginRequest>::from_request(req, state)
                .await
                .map(|Json(b)| b)
                .map_err(|e| AppError::Validation(e.body_text()))?
        } else {
            Form::<LoginRequest>::from_request(req, state)
                .await
                .map(|Form(b)| b)
                .map_err(|e| AppError::Validation(e.body_text()))?
        };

        Ok(Self { body, is_json })
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_login_page(error: Option<&str>) -> Html<String> {
    let alert = error
        .map(|m| format!(r#"<p role="alert">{}</p>"#, escape_html(m)))
        .unwrap_or_default();
    Html(LOGIN_PAGE.replace("<!--error-->", &alert))
}

/// A failed form post stays on the login page with the message inline.
fn form_login_failure(err: AppError) -> Response {
    let (status, message) = match &err {
        AppError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
        AppError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            INVALID_CREDENTIALS_MESSAGE.to_string(),
        ),
        _ => return err.into_response(),
    };
    (status, render_login_page(Some(&message))).into_response()
}

/// `GET /login` — minimal login form.
pub async fn login_page() -> Html<String> {
    render_login_page(None)
}

/// `POST /login` — exchange phone + password for a session cookie.
///
/// JSON clients get a [`LoginSuccess`] body or a JSON error. Form posts are
/// redirected to the dashboard, or shown the form again with the error.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    form: LoginForm,
) -> AppResult<Response> {
    let (session, token) = match auth::login(&state, &form.body.phone, &form.body.password).await {
        Ok(issued) => issued,
        Err(e) if !form.is_json => return Ok(form_login_failure(e)),
        Err(e) => return Err(e),
    };
    let jar = jar.add(session_cookie(&token, state.config.cookie_secure));

    if form.is_json {
        let body = LoginSuccess {
            redirect: DASHBOARD_PATH.to_string(),
            user: session.user(),
        };
        Ok((jar, Json(body)).into_response())
    } else {
        Ok((jar, Redirect::to(DASHBOARD_PATH)).into_response())
    }
}

/// `POST /logout` — end the session and return to the login page.
pub async fn logout_handler(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(session) = session_from_jar(&jar, state.config.session_secret.as_bytes()) {
        auth::logout(&state, &session).await;
    }
    (jar.add(clear_session_cookie()), Redirect::to(LOGIN_PATH))
}

/// `GET /api/session` — the signed-in user, without tokens.
pub async fn session_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<SessionUser>> {
    session_from_jar(&jar, state.config.session_secret.as_bytes())
        .map(|s| Json(s.user()))
        .ok_or_else(|| AppError::Unauthorized("No active session".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_without_error_has_no_alert() {
        let Html(page) = render_login_page(None);
        assert!(!page.contains("role=\"alert\""));
        assert!(!page.contains("<!--error-->"));
    }

    #[test]
    fn error_message_is_escaped() {
        let Html(page) = render_login_page(Some("<b>\"x\" & y</b>"));
        assert!(page.contains("&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;"));
    }
}
