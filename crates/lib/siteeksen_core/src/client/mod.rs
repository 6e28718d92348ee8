//! Typed client for the SiteEksen resource API.
//!
//! [`ApiClient`] owns the HTTP transport and base URL and is shared across
//! requests. Bearer state is never stored on it: [`ApiClient::with_bearer`]
//! returns a [`SessionClient`] scoped to one session, which carries the access
//! token on every call. Resource operations live in the submodules as
//! `impl SessionClient` blocks.

mod announcements;
mod auth;
mod dashboard;
mod finance;
mod meters;
mod reports;
mod requests;
mod residents;

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub use dashboard::RECENT_LIMIT;

/// Default resource API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Empty query string for endpoints without filters.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];

/// Resource API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Resource API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid path segment: {0:?}")]
    InvalidPathSegment(String),
}

/// Convenience alias for client results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Shared HTTP transport for the resource API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client with its own connection pool and a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::from_client(http, base_url)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_client(http: Client, base_url: &str) -> ApiResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Join path segments onto the base URL. Each segment is percent-encoded.
    ///
    /// Empty, `.` and `..` segments are rejected with
    /// [`ApiError::InvalidPathSegment`]; `url` would otherwise drop them.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(ApiError::InvalidPathSegment((*bad).to_string()));
        }
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Scope the client to one session's access token.
    pub fn with_bearer(&self, access_token: impl Into<String>) -> SessionClient {
        SessionClient {
            api: self.clone(),
            access_token: access_token.into(),
        }
    }
}

/// Resource API client bound to one session's bearer token.
#[derive(Clone)]
pub struct SessionClient {
    api: ApiClient,
    access_token: String,
}

impl fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClient")
            .field("base_url", &self.api.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SessionClient {
    fn request(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
        let url = self.api.endpoint(segments)?;
        debug!(%method, %url, "resource API request");
        Ok(self
            .api
            .http
            .request(method, url)
            .bearer_auth(&self.access_token))
    }

    pub(crate) async fn get_json<Q>(&self, segments: &[&str], query: &Q) -> ApiResult<Value>
    where
        Q: Serialize + ?Sized,
    {
        let resp = self.request(Method::GET, segments)?.query(query).send().await?;
        read_json(resp).await
    }

    pub(crate) async fn send_json<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> ApiResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let resp = self.request(method, segments)?.json(body).send().await?;
        read_json(resp).await
    }

    pub(crate) async fn delete(&self, segments: &[&str]) -> ApiResult<()> {
        let resp = self.request(Method::DELETE, segments)?.send().await?;
        check_status(resp).await?;
        Ok(())
    }

    pub(crate) async fn get_bytes(&self, segments: &[&str]) -> ApiResult<Vec<u8>> {
        let resp = self.request(Method::GET, segments)?.send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.bytes().await?.to_vec())
    }
}

/// Map `401` to [`ApiError::Unauthorized`] and other non-2xx statuses to
/// [`ApiError::Status`].
pub(crate) async fn check_status(resp: Response) -> ApiResult<Response> {
    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp)
}

/// Decode a JSON body. An empty body (e.g. `204`) becomes `null`.
pub(crate) async fn read_json(resp: Response) -> ApiResult<Value> {
    let resp = check_status(resp).await?;
    let bytes = resp.bytes().await?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn endpoint_appends_segments() {
        let api = client("http://localhost:8000/api/v1");
        assert_eq!(
            api.endpoint(&["finance", "assessments"]).unwrap().as_str(),
            "http://localhost:8000/api/v1/finance/assessments"
        );
    }

    #[test]
    fn endpoint_handles_trailing_slash() {
        let api = client("http://localhost:8000/api/v1/");
        assert_eq!(
            api.endpoint(&["residents"]).unwrap().as_str(),
            "http://localhost:8000/api/v1/residents"
        );
    }

    #[test]
    fn endpoint_encodes_ids() {
        let api = client("http://localhost:8000/api/v1");
        assert_eq!(
            api.endpoint(&["residents", "a/b c"]).unwrap().as_str(),
            "http://localhost:8000/api/v1/residents/a%2Fb%20c"
        );
    }

    #[test]
    fn endpoint_rejects_dot_and_empty_segments() {
        let api = client("http://localhost:8000/api/v1");
        for segments in [
            &["announcements", ".."][..],
            &["announcements", "."],
            &["residents", ""],
            &["reports", "..", "download"],
        ] {
            let err = api.endpoint(segments).unwrap_err();
            assert!(matches!(err, ApiError::InvalidPathSegment(_)), "{segments:?}");
        }
        // Dots inside a segment are ordinary characters.
        assert_eq!(
            api.endpoint(&["reports", "rep..1", "download"]).unwrap().as_str(),
            "http://localhost:8000/api/v1/reports/rep..1/download"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = ApiClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
        let err = ApiClient::new("mailto:ops@example.com", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn session_client_debug_hides_token() {
        let session = client("http://localhost:8000/api/v1").with_bearer("AT-secret");
        assert!(!format!("{session:?}").contains("AT-secret"));
    }
}
