//! `/reports/*`

use reqwest::Method;
use serde_json::Value;

use super::{ApiResult, SessionClient};
use crate::models::api::ReportRequest;

impl SessionClient {
    /// `POST /reports/generate`
    pub async fn generate_report(&self, request: &ReportRequest) -> ApiResult<Value> {
        self.send_json(Method::POST, &["reports", "generate"], request)
            .await
    }

    /// `GET /reports/{id}/download` — raw file contents (PDF or XLSX).
    pub async fn download_report(&self, id: &str) -> ApiResult<Vec<u8>> {
        self.get_bytes(&["reports", id, "download"]).await
    }
}
