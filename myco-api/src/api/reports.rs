//! Sighting report endpoints
//!
//! Status codes for an absent report differ by method: GET answers 404,
//! PATCH and DELETE answer 400.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use myco_common::{NewReport, ObjectId, Report};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::route_not_found;
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct ReportsResponse {
    pub reports: Vec<Report>,
}

/// Single-document response
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: Report,
}

/// GET by id wraps its document in a one-element list
#[derive(Debug, Serialize)]
pub struct ReportLookupResponse {
    pub report: Vec<Report>,
}

/// POST body: `{"report": {...}}`
#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub report: Option<NewReport>,
}

/// PATCH body: `{"suggestedSpecies": "..."}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub suggested_species: Option<String>,
}

fn parse_id(raw: &str) -> ApiResult<ObjectId> {
    Ok(ObjectId::parse(raw)?)
}

/// GET /api/reports
pub async fn list_reports(State(state): State<AppState>) -> ApiResult<Json<ReportsResponse>> {
    let reports = state.store.list_reports().await?;
    Ok(Json(ReportsResponse { reports }))
}

/// GET /api/reports/:id
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReportLookupResponse>> {
    let id = parse_id(&id)?;
    let report = state.store.get_report(id).await?;
    Ok(Json(ReportLookupResponse {
        report: vec![report],
    }))
}

/// POST /api/reports
///
/// Requires location, img_url, username, time_stamp and species.
pub async fn create_report(
    State(state): State<AppState>,
    payload: Result<Json<CreateReportRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ReportResponse>)> {
    let Json(request) = payload?;
    let submission = request
        .report
        .ok_or_else(|| ApiError::BadRequest("missing report".to_string()))?
        .validate()?;

    let report = state.store.create_report(submission).await?;
    Ok((StatusCode::CREATED, Json(ReportResponse { report })))
}

/// PATCH /api/reports/:id
///
/// Casts one vote for `suggestedSpecies`, which must be a catalog species.
pub async fn vote_on_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ReportResponse>)> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let suggested = request
        .suggested_species
        .ok_or_else(|| ApiError::BadRequest("missing suggestedSpecies".to_string()))?;

    let report = state
        .store
        .cast_vote(id, &suggested)
        .await
        .map_err(ApiError::absent_as_bad_request)?;

    info!(
        "Report {} now led by '{}' at {}% credibility",
        report.id, report.species.species, report.credibility
    );
    Ok((StatusCode::CREATED, Json(ReportResponse { report })))
}

/// DELETE /api/reports/:id
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReportResponse>> {
    let id = parse_id(&id)?;
    let report = state
        .store
        .delete_report(id)
        .await
        .map_err(ApiError::absent_as_bad_request)?;

    Ok(Json(ReportResponse { report }))
}

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/reports",
            get(list_reports)
                .post(create_report)
                .fallback(route_not_found),
        )
        .route(
            "/api/reports/:id",
            get(get_report)
                .patch(vote_on_report)
                .delete(delete_report)
                .fallback(route_not_found),
        )
}
