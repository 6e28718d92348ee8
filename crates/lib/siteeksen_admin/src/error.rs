//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use siteeksen_core::auth::AuthError;
use siteeksen_core::client::ApiError;
use thiserror::Error;
use tracing::{error, warn};

use crate::middleware::guard::LOGIN_PATH;
use crate::models::ErrorResponse;
use crate::services::cookies::clear_session_cookie;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Message shown for both rejected credentials and identity-service outages.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Phone number or password is incorrect";

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The resource API no longer accepts the session's access token.
    #[error("Session expired")]
    SessionExpired,

    #[error("Resource API error: {0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                INVALID_CREDENTIALS_MESSAGE,
            ),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::SessionExpired => {
                let jar = CookieJar::new().add(clear_session_cookie());
                return (jar, Redirect::to(LOGIN_PATH)).into_response();
            }
            AppError::Upstream(m) => (StatusCode::BAD_GATEWAY, "upstream_error", m.as_str()),
            AppError::Internal(m) => {
                error!(error = %m, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingFields | AuthError::InvalidPhone => AppError::Validation(e.to_string()),
            AuthError::TokenError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Unauthorized => AppError::SessionExpired,
            ApiError::Status { status, body } => {
                warn!(status, body = %body, "resource API returned an error");
                AppError::Upstream(format!("Resource API returned status {status}"))
            }
            ApiError::Transport(e) => {
                warn!(error = %e, "resource API unreachable");
                AppError::Upstream("Resource API unreachable".into())
            }
            ApiError::Decode(msg) => {
                warn!(error = %msg, "resource API returned an unreadable body");
                AppError::Upstream("Resource API returned an unreadable response".into())
            }
            ApiError::InvalidPathSegment(segment) => {
                AppError::Validation(format!("Invalid resource id: {segment:?}"))
            }
            ApiError::InvalidBaseUrl(msg) => AppError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::{LOCATION, SET_COOKIE};

    use super::*;

    #[test]
    fn invalid_credentials_is_401_with_fixed_message() {
        let resp = AppError::InvalidCredentials.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn missing_fields_is_validation() {
        let err = AppError::from(AuthError::MissingFields);
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_unauthorized_expires_session() {
        let resp = AppError::from(ApiError::Unauthorized).into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[LOCATION], LOGIN_PATH);
        let cookie = resp.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn upstream_status_is_bad_gateway() {
        let err = AppError::from(ApiError::Status {
            status: 500,
            body: "boom".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
