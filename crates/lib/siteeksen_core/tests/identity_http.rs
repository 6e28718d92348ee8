//! Integration test — session issuer against a fake identity service over HTTP.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::{Value, json};
use siteeksen_core::auth::phone::DEFAULT_COUNTRY_CODE;
use siteeksen_core::auth::{Credentials, HttpIdentityProvider, SessionIssuer};
use siteeksen_core::client::ApiClient;

async fn login(State(calls): State<Arc<AtomicUsize>>, Json(body): Json<Value>) -> Response {
    calls.fetch_add(1, Ordering::SeqCst);
    match (body["phone"].as_str(), body["password"].as_str()) {
        (Some("+905551234567"), Some("secret1")) => Json(json!({
            "access_token": "AT1",
            "refresh_token": "RT1",
            "user": {
                "id": "u1",
                "first_name": "Zeynep",
                "last_name": "Kaya",
                "email": "zeynep@example.com",
                "phone": "+905551234567",
                "roles": ["admin"],
                "active_property_id": "p1"
            }
        }))
        .into_response(),
        (Some("+905550000000"), _) => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Telefon veya şifre hatalı"})),
        )
            .into_response(),
    }
}

async fn spawn_identity_service() -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .with_state(calls.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api/v1"), calls)
}

fn issuer(base_url: &str) -> SessionIssuer {
    let api = ApiClient::new(base_url, Duration::from_secs(2)).unwrap();
    SessionIssuer::new(Arc::new(HttpIdentityProvider::new(&api).unwrap()))
}

fn creds(phone: &str, password: &str) -> Credentials {
    Credentials::new(phone, password, DEFAULT_COUNTRY_CODE).unwrap()
}

#[tokio::test]
async fn valid_credentials_produce_session() {
    let (url, calls) = spawn_identity_service().await;

    let session = issuer(&url)
        .issue(&creds("5551234567", "secret1"))
        .await
        .expect("session");

    assert_eq!(session.subject(), "u1");
    assert_eq!(session.name(), "Zeynep Kaya");
    assert_eq!(session.roles(), ["admin"]);
    assert_eq!(session.access_token(), "AT1");
    assert_eq!(session.refresh_token(), "RT1");
    assert_eq!(session.property_id(), Some("p1"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_credentials_produce_no_session() {
    let (url, calls) = spawn_identity_service().await;

    let session = issuer(&url).issue(&creds("5551234567", "wrong")).await;

    assert!(session.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1, "no retry after rejection");
}

#[tokio::test]
async fn malformed_success_body_produces_no_session() {
    let (url, _) = spawn_identity_service().await;
    let session = issuer(&url).issue(&creds("5550000000", "secret1")).await;
    assert!(session.is_none());
}

#[tokio::test]
async fn unreachable_service_produces_no_session() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = issuer(&format!("http://{addr}/api/v1"))
        .issue(&creds("5551234567", "secret1"))
        .await;

    assert!(session.is_none());
}
