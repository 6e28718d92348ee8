//! Response bodies of the admin HTTP layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use siteeksen_core::models::auth::SessionUser;

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// `POST /login` success body. The session itself travels in the cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSuccess {
    pub redirect: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `GET /dashboard`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub user: SessionUser,
    pub stats: Value,
    pub recent_payments: Value,
    pub recent_requests: Value,
}

/// `GET /dashboard/assessments`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentsView {
    pub assessments: Value,
    pub expense_categories: Value,
    pub debt_status: Value,
}

/// `GET /dashboard/meters`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetersView {
    pub meters: Value,
    pub consumption: Value,
}
