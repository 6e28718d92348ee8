//! `/dashboard/*` summary endpoints.

use serde_json::Value;

use super::{ApiResult, NO_QUERY, SessionClient};
use crate::models::api::LimitQuery;

/// Default row count for the "recent" widgets.
pub const RECENT_LIMIT: u32 = 5;

impl SessionClient {
    /// `GET /dashboard/stats`
    pub async fn dashboard_stats(&self) -> ApiResult<Value> {
        self.get_json(&["dashboard", "stats"], NO_QUERY).await
    }

    /// `GET /dashboard/recent-payments?limit=N`
    pub async fn recent_payments(&self, limit: u32) -> ApiResult<Value> {
        self.get_json(&["dashboard", "recent-payments"], &LimitQuery { limit })
            .await
    }

    /// `GET /dashboard/recent-requests?limit=N`
    pub async fn recent_requests(&self, limit: u32) -> ApiResult<Value> {
        self.get_json(&["dashboard", "recent-requests"], &LimitQuery { limit })
            .await
    }
}
