use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::navigation::{EnrichedPosition, PositionReport};
use crate::tracker::Record;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

/// Raw operator input, as sent by the JSON API and the HTML form.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct PositionRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub speed_knots: f64,
    pub course_degrees: f64,
}

impl PositionRequest {
    pub fn report(&self) -> PositionReport {
        PositionReport::new(
            self.latitude,
            self.longitude,
            self.speed_knots,
            self.course_degrees,
        )
    }
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/positions",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    request_body = PositionRequest,
    responses(
        (status = 201, description = "Position enriched and appended", body = Record),
        (status = 400, description = "Input out of range", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 507, description = "Log is full", body = ErrorResponse)
    ),
    tag = "positions"
)]
pub async fn submit_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PositionRequest>,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let tracker = state.tracker(id).await?;
    let record = tracker.submit_report(request.report(), Utc::now())?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/positions",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Log in submission order", body = Vec<EnrichedPosition>),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "positions"
)]
pub async fn list_positions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<EnrichedPosition>>> {
    Ok(Json(state.tracker(id).await?.log()))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/positions/last",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Most recent entry, null while the log is empty", body = Option<EnrichedPosition>),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "positions"
)]
pub async fn last_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Option<EnrichedPosition>>> {
    Ok(Json(state.tracker(id).await?.last()))
}
