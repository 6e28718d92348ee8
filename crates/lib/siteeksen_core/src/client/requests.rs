//! Maintenance requests (`/requests`).

use reqwest::Method;
use serde_json::Value;

use super::{ApiResult, SessionClient};
use crate::models::api::{RequestAssignment, RequestQuery, RequestStatusUpdate};

impl SessionClient {
    /// `GET /requests`
    pub async fn list_requests(&self, query: &RequestQuery) -> ApiResult<Value> {
        self.get_json(&["requests"], query).await
    }

    /// `PATCH /requests/{id}/status`
    pub async fn update_request_status(
        &self,
        id: &str,
        update: &RequestStatusUpdate,
    ) -> ApiResult<Value> {
        self.send_json(Method::PATCH, &["requests", id, "status"], update)
            .await
    }

    /// `PATCH /requests/{id}/assign`
    pub async fn assign_request(&self, id: &str, assignee_id: &str) -> ApiResult<Value> {
        let body = RequestAssignment {
            assignee_id: assignee_id.to_string(),
        };
        self.send_json(Method::PATCH, &["requests", id, "assign"], &body)
            .await
    }
}
