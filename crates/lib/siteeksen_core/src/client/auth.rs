//! `/auth/*` and `/users/me`.

use reqwest::Method;
use serde_json::Value;

use super::{ApiClient, ApiError, ApiResult, NO_QUERY, SessionClient, read_json};
use crate::models::auth::{RefreshRequest, RefreshedTokens};

impl ApiClient {
    /// `POST /auth/refresh` — exchange a refresh token for a new token pair.
    ///
    /// Never called implicitly; an expired access token ends the session.
    pub async fn refresh(&self, refresh_token: &str) -> ApiResult<RefreshedTokens> {
        let resp = self
            .http
            .post(self.endpoint(&["auth", "refresh"])?)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        let body = read_json(resp).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl SessionClient {
    /// `POST /auth/logout`
    pub async fn logout(&self) -> ApiResult<()> {
        self.send_json(Method::POST, &["auth", "logout"], &serde_json::json!({}))
            .await
            .map(|_| ())
    }

    /// `GET /users/me`
    pub async fn current_user(&self) -> ApiResult<Value> {
        self.get_json(&["users", "me"], NO_QUERY).await
    }
}
