use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::navigation::{EnrichedPosition, FixedWaypoints};
use crate::route::{RouteLabels, RouteView};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct WaypointsResponse {
    pub waypoints: FixedWaypoints,
    pub labels: RouteLabels,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: String,
    pub waypoints: FixedWaypoints,
    pub entries: Vec<EnrichedPosition>,
}

#[utoipa::path(
    get,
    path = "/api/waypoints",
    responses(
        (status = 200, description = "Configured origin and destination", body = WaypointsResponse)
    ),
    tag = "sessions"
)]
pub async fn get_waypoints(State(state): State<AppState>) -> Json<WaypointsResponse> {
    Json(WaypointsResponse {
        waypoints: state.waypoints,
        labels: state.labels.as_ref().clone(),
    })
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    responses(
        (status = 201, description = "Session created with an empty log", body = SessionResponse)
    ),
    tag = "sessions"
)]
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let (id, tracker) = state.sessions.create().await;
    let status = tracker.status();
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            id: id.to_string(),
            waypoints: status.waypoints,
            entries: status.entries,
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Waypoints and full log", body = SessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "sessions"
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionResponse>> {
    let status = state.tracker(id).await?.status();
    Ok(Json(SessionResponse {
        id: id.to_string(),
        waypoints: status.waypoints,
        entries: status.entries,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 204, description = "Session closed"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "sessions"
)]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/reset",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Log replaced with an empty one", body = SessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "sessions"
)]
pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionResponse>> {
    let tracker = state.tracker(id).await?;
    tracker.reset();
    let status = tracker.status();
    Ok(Json(SessionResponse {
        id: id.to_string(),
        waypoints: status.waypoints,
        entries: status.entries,
    }))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/route",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Markers, track and ledger for rendering", body = RouteView),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "sessions"
)]
pub async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<RouteView>> {
    let status = state.tracker(id).await?.status();
    Ok(Json(RouteView::from_status(&status, &state.labels)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn session_lifecycle() {
        let state = AppState::new(Config::default()).unwrap();

        let (id, tracker) = state.sessions.create().await;
        tracker.submit_position(31.9621, 33.2487, 8.86, 112.5).unwrap();

        let Json(session) = get_session(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(session.id, id.to_string());
        assert_eq!(session.entries.len(), 1);

        let Json(route) = get_route(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(route.polyline.len(), 3);

        let Json(session) = reset_session(State(state.clone()), Path(id)).await.unwrap();
        assert!(session.entries.is_empty());

        let status = delete_session(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(matches!(
            get_session(State(state), Path(id)).await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn waypoints_from_config() {
        let state = AppState::new(Config::default()).unwrap();
        let Json(body) = get_waypoints(State(state)).await;
        assert_eq!(body.waypoints, FixedWaypoints::default());
        assert_eq!(body.labels, RouteLabels::default());
    }
}
