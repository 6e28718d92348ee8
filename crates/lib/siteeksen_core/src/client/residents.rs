//! `/residents`

use reqwest::Method;
use serde_json::Value;

use super::{ApiResult, SessionClient};
use crate::models::api::{NewResident, ResidentPatch, ResidentQuery};

impl SessionClient {
    /// `GET /residents`
    pub async fn list_residents(&self, query: &ResidentQuery) -> ApiResult<Value> {
        self.get_json(&["residents"], query).await
    }

    /// `POST /residents`
    pub async fn create_resident(&self, resident: &NewResident) -> ApiResult<Value> {
        self.send_json(Method::POST, &["residents"], resident).await
    }

    /// `PATCH /residents/{id}`
    pub async fn update_resident(&self, id: &str, patch: &ResidentPatch) -> ApiResult<Value> {
        self.send_json(Method::PATCH, &["residents", id], patch).await
    }
}
