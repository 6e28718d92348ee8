//! `/finance/*`

use reqwest::Method;
use serde_json::Value;

use super::{ApiResult, NO_QUERY, SessionClient};
use crate::models::api::{AssessmentQuery, ConsumptionQuery, NewAssessment, PaymentQuery};

impl SessionClient {
    /// `GET /finance/debt-status`
    pub async fn debt_status(&self) -> ApiResult<Value> {
        self.get_json(&["finance", "debt-status"], NO_QUERY).await
    }

    /// `GET /finance/assessments`
    pub async fn list_assessments(&self, query: &AssessmentQuery) -> ApiResult<Value> {
        self.get_json(&["finance", "assessments"], query).await
    }

    /// `POST /finance/assessments`
    pub async fn create_assessment(&self, assessment: &NewAssessment) -> ApiResult<Value> {
        self.send_json(Method::POST, &["finance", "assessments"], assessment)
            .await
    }

    /// `GET /finance/payments`
    pub async fn list_payments(&self, query: &PaymentQuery) -> ApiResult<Value> {
        self.get_json(&["finance", "payments"], query).await
    }

    /// `GET /finance/expense-categories`
    pub async fn list_expense_categories(&self) -> ApiResult<Value> {
        self.get_json(&["finance", "expense-categories"], NO_QUERY)
            .await
    }

    /// `GET /finance/consumption/summary`
    pub async fn consumption_summary(&self, query: &ConsumptionQuery) -> ApiResult<Value> {
        self.get_json(&["finance", "consumption", "summary"], query)
            .await
    }
}
