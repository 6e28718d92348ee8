//! `/meters`

use reqwest::Method;
use serde_json::Value;

use super::{ApiResult, SessionClient};
use crate::models::api::{MeterQuery, MeterReadingBatch};

impl SessionClient {
    /// `GET /meters`
    pub async fn list_meters(&self, query: &MeterQuery) -> ApiResult<Value> {
        self.get_json(&["meters"], query).await
    }

    /// `POST /meters/readings` — one period's readings in a single batch.
    pub async fn submit_meter_readings(&self, batch: &MeterReadingBatch) -> ApiResult<Value> {
        self.send_json(Method::POST, &["meters", "readings"], batch)
            .await
    }
}
