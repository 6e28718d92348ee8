//! Dashboard request handlers.
//!
//! Every route here sits behind the route guard, so [`CurrentSession`] is
//! always present. Handlers forward to the resource API with the session's
//! bearer token and return its JSON.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::Value;
use siteeksen_core::client::{RECENT_LIMIT, SessionClient};
use siteeksen_core::models::api::{
    AnnouncementQuery, AssessmentQuery, ConsumptionQuery, MeterQuery, MeterReadingBatch,
    NewAnnouncement, NewAssessment, NewResident, ReportRequest, RequestAssignment, RequestQuery,
    RequestStatusUpdate, ResidentPatch, ResidentQuery,
};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::guard::CurrentSession;
use crate::models::{AssessmentsView, DashboardOverview, MetersView};

fn client(state: &AppState, session: &CurrentSession) -> SessionClient {
    state.api.with_bearer(session.0.access_token())
}

/// `GET /dashboard` — stats plus the recent payments and requests widgets.
pub async fn overview_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> AppResult<Json<DashboardOverview>> {
    let api = client(&state, &session);
    let (stats, recent_payments, recent_requests) = tokio::try_join!(
        api.dashboard_stats(),
        api.recent_payments(RECENT_LIMIT),
        api.recent_requests(RECENT_LIMIT),
    )?;
    Ok(Json(DashboardOverview {
        user: session.0.user(),
        stats,
        recent_payments,
        recent_requests,
    }))
}

// ---------------------------------------------------------------------------
// Residents
// ---------------------------------------------------------------------------

pub async fn list_residents_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Query(query): Query<ResidentQuery>,
) -> AppResult<Json<Value>> {
    Ok(Json(client(&state, &session).list_residents(&query).await?))
}

pub async fn create_resident_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Json(body): Json<NewResident>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let created = client(&state, &session).create_resident(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_resident_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<String>,
    Json(body): Json<ResidentPatch>,
) -> AppResult<Json<Value>> {
    Ok(Json(client(&state, &session).update_resident(&id, &body).await?))
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

/// `GET /dashboard/assessments` — assessments, expense categories and the
/// debt summary.
pub async fn assessments_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Query(query): Query<AssessmentQuery>,
) -> AppResult<Json<AssessmentsView>> {
    let api = client(&state, &session);
    let (assessments, expense_categories, debt_status) = tokio::try_join!(
        api.list_assessments(&query),
        api.list_expense_categories(),
        api.debt_status(),
    )?;
    Ok(Json(AssessmentsView {
        assessments,
        expense_categories,
        debt_status,
    }))
}

pub async fn create_assessment_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Json(body): Json<NewAssessment>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let created = client(&state, &session).create_assessment(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------------------
// Meters
// ---------------------------------------------------------------------------

pub async fn meters_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Query(query): Query<MeterQuery>,
) -> AppResult<Json<MetersView>> {
    let api = client(&state, &session);
    let consumption_query = ConsumptionQuery {
        meter_type: query.meter_type.clone(),
    };
    let (meters, consumption) = tokio::try_join!(
        api.list_meters(&query),
        api.consumption_summary(&consumption_query),
    )?;
    Ok(Json(MetersView {
        meters,
        consumption,
    }))
}

pub async fn submit_readings_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Json(body): Json<MeterReadingBatch>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let saved = client(&state, &session).submit_meter_readings(&body).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

pub async fn list_announcements_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Query(query): Query<AnnouncementQuery>,
) -> AppResult<Json<Value>> {
    Ok(Json(
        client(&state, &session).list_announcements(&query).await?,
    ))
}

pub async fn create_announcement_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Json(body): Json<NewAnnouncement>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let created = client(&state, &session).create_announcement(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_announcement_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    client(&state, &session).delete_announcement(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Maintenance requests
// ---------------------------------------------------------------------------

pub async fn list_requests_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<Value>> {
    Ok(Json(client(&state, &session).list_requests(&query).await?))
}

pub async fn update_request_status_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<String>,
    Json(body): Json<RequestStatusUpdate>,
) -> AppResult<Json<Value>> {
    Ok(Json(
        client(&state, &session)
            .update_request_status(&id, &body)
            .await?,
    ))
}

pub async fn assign_request_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<String>,
    Json(body): Json<RequestAssignment>,
) -> AppResult<Json<Value>> {
    Ok(Json(
        client(&state, &session)
            .assign_request(&id, &body.assignee_id)
            .await?,
    ))
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

pub async fn generate_report_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Json(body): Json<ReportRequest>,
) -> AppResult<Json<Value>> {
    Ok(Json(client(&state, &session).generate_report(&body).await?))
}

pub async fn download_report_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let bytes = client(&state, &session).download_report(&id).await?;
    let disposition = format!("attachment; filename=\"report-{}\"", sanitize_filename(&id));
    Ok((
        [
            (CONTENT_TYPE, "application/octet-stream".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// Keep only characters that are safe inside a quoted header parameter.
fn sanitize_filename(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_sanitized() {
        assert_eq!(sanitize_filename("rep-2026_01.pdf"), "rep-2026_01.pdf");
        assert_eq!(sanitize_filename("a\"b\r\nc/d"), "abcd");
    }
}
