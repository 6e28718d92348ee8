//! Shared fixtures: a fake backend, router construction and cookie helpers.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, SET_COOKIE};
use axum::http::{HeaderMap, Method, Response, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::post;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use siteeksen_admin::config::AdminConfig;
use siteeksen_admin::services::cookies::SESSION_COOKIE;
use siteeksen_admin::{AppState, router};

pub const SECRET: &str = "test-session-secret";

/// Counters observed by tests.
#[derive(Default)]
pub struct BackendCalls {
    pub logins: AtomicUsize,
    pub logouts: AtomicUsize,
}

impl BackendCalls {
    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn logouts(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }
}

async fn login(State(calls): State<Arc<BackendCalls>>, Json(body): Json<Value>) -> impl IntoResponse {
    calls.logins.fetch_add(1, Ordering::SeqCst);
    if body["phone"] == "+905551234567" && body["password"] == "secret1" {
        Json(json!({
            "access_token": "AT1",
            "refresh_token": "RT1",
            "user": {
                "id": "u1",
                "first_name": "Ali",
                "last_name": "Veli",
                "email": "ali@example.com",
                "phone": "+905551234567",
                "roles": ["admin"],
                "active_property_id": "p1"
            }
        }))
        .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid"}))).into_response()
    }
}

async fn logout(State(calls): State<Arc<BackendCalls>>, headers: HeaderMap) -> impl IntoResponse {
    if headers.get(AUTHORIZATION).is_some_and(|v| v == "Bearer AT1") {
        calls.logouts.fetch_add(1, Ordering::SeqCst);
        Json(json!({"success": true})).into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

/// Resource API stand-in: accepts only `Bearer AT1` and echoes the request.
async fn resource(method: Method, uri: Uri, headers: HeaderMap) -> impl IntoResponse {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if auth != "Bearer AT1" {
        return (StatusCode::UNAUTHORIZED, "token expired").into_response();
    }
    if uri.path().ends_with("/download") {
        return (StatusCode::OK, b"PK\x03\x04xlsx".to_vec()).into_response();
    }
    if method == Method::DELETE {
        return StatusCode::NO_CONTENT.into_response();
    }
    if uri.path().ends_with("/dashboard/stats") {
        return Json(json!({"total_units": 120, "collection_rate": 87.5})).into_response();
    }
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "auth": auth,
    }))
    .into_response()
}

/// Start the fake backend; returns its `/api/v1` base URL.
pub async fn spawn_backend() -> (String, Arc<BackendCalls>) {
    let calls = Arc::new(BackendCalls::default());
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .fallback(resource)
        .with_state(calls.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api/v1"), calls)
}

/// A base URL nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/v1")
}

pub fn config(api_url: &str) -> AdminConfig {
    AdminConfig {
        bind_addr: "127.0.0.1:0".into(),
        api_url: api_url.into(),
        session_secret: SECRET.into(),
        cookie_secure: false,
        phone_country_code: "90".into(),
        upstream_timeout: Duration::from_secs(2),
    }
}

pub fn app(api_url: &str) -> Router {
    router(AppState::new(config(api_url)).expect("app state"))
}

/// Sign a session token directly, as the issuer would have.
pub fn forge_session(access_token: &str, secret: &str, expires_in_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = json!({
        "sub": "u1",
        "name": "Ali Veli",
        "phone": "+905551234567",
        "roles": ["admin"],
        "property_id": "p1",
        "access_token": access_token,
        "refresh_token": "RT1",
        "iat": now,
        "exp": now + expires_in_secs,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn valid_session() -> String {
    forge_session("AT1", SECRET, 3600)
}

pub fn cookie_header(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}")
}

/// The raw `Set-Cookie` header for the session cookie, if any.
pub fn set_session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{SESSION_COOKIE}=")))
        .map(str::to_string)
}

/// Value part of a `Set-Cookie` header.
pub fn cookie_value(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, v)| v.to_string())
        .unwrap_or_default()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("parse JSON")
}
