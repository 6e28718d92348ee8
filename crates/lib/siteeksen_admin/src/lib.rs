//! # siteeksen_admin
//!
//! HTTP layer of the SiteEksen admin panel.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use siteeksen_core::auth::{HttpIdentityProvider, SessionIssuer};
use siteeksen_core::client::{ApiClient, ApiError};
use tower_http::trace::TraceLayer;

use crate::config::AdminConfig;
use crate::handlers::{auth, dashboard, health};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: AdminConfig,
    /// Credential exchange with the identity service.
    pub issuer: SessionIssuer,
    /// Resource API transport (no bearer state).
    pub api: ApiClient,
}

impl AppState {
    /// Build state whose issuer talks to `{api_url}/auth/login`.
    pub fn new(config: AdminConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api_url, config.upstream_timeout)?;
        let issuer = SessionIssuer::new(Arc::new(HttpIdentityProvider::new(&api)?));
        Ok(Self {
            config,
            issuer,
            api,
        })
    }
}

/// Builds the Axum router with all routes and shared state.
///
/// The route guard wraps the whole router, fallback included, so unknown
/// paths under `/dashboard` still redirect when signed out.
pub fn router(state: AppState) -> Router {
    // Unguarded and login routes
    let public = Router::new()
        .route("/health", get(health::health_handler))
        .route("/login", get(auth::login_page).post(auth::login_handler))
        .route("/logout", post(auth::logout_handler))
        .route("/api/session", get(auth::session_handler));

    // Protected routes (guard guarantees a session)
    let protected = Router::new()
        .route("/dashboard", get(dashboard::overview_handler))
        .route(
            "/dashboard/residents",
            get(dashboard::list_residents_handler).post(dashboard::create_resident_handler),
        )
        .route(
            "/dashboard/residents/{id}",
            patch(dashboard::update_resident_handler),
        )
        .route(
            "/dashboard/assessments",
            get(dashboard::assessments_handler).post(dashboard::create_assessment_handler),
        )
        .route("/dashboard/meters", get(dashboard::meters_handler))
        .route(
            "/dashboard/meters/readings",
            post(dashboard::submit_readings_handler),
        )
        .route(
            "/dashboard/announcements",
            get(dashboard::list_announcements_handler)
                .post(dashboard::create_announcement_handler),
        )
        .route(
            "/dashboard/announcements/{id}",
            delete(dashboard::delete_announcement_handler),
        )
        .route("/dashboard/requests", get(dashboard::list_requests_handler))
        .route(
            "/dashboard/requests/{id}/status",
            patch(dashboard::update_request_status_handler),
        )
        .route(
            "/dashboard/requests/{id}/assign",
            patch(dashboard::assign_request_handler),
        )
        .route("/dashboard/reports", post(dashboard::generate_report_handler))
        .route(
            "/dashboard/reports/{id}/download",
            get(dashboard::download_report_handler),
        );

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::guard::route_guard,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
