use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use uuid::Uuid;

use crate::route::RouteView;
use crate::tracker::Tracker;
use crate::web::api::positions::PositionRequest;
use crate::web::state::AppState;

use super::templates::{FormValues, SessionTemplate};

fn session_url(id: Uuid) -> String {
    format!("/sessions/{}", id)
}

fn render(
    state: &AppState,
    id: Uuid,
    tracker: &Tracker,
    form: FormValues,
    error: Option<String>,
) -> SessionTemplate {
    let view = RouteView::from_status(&tracker.status(), &state.labels);
    SessionTemplate::new(id.to_string(), &state.labels, view, form, error)
}

pub async fn new_session(State(state): State<AppState>) -> Redirect {
    let (id, _) = state.sessions.create().await;
    Redirect::to(&session_url(id))
}

pub async fn session_page(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.sessions.get(id).await {
        Some(tracker) => render(&state, id, &tracker, FormValues::default(), None).into_response(),
        // unknown, expired or evicted session: start over
        None => Redirect::to("/").into_response(),
    }
}

pub async fn submit_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(request): Form<PositionRequest>,
) -> Response {
    let Some(tracker) = state.sessions.get(id).await else {
        return Redirect::to("/").into_response();
    };

    match tracker.submit_report(request.report(), Utc::now()) {
        Ok(_) => Redirect::to(&session_url(id)).into_response(),
        Err(e) => {
            let page = render(&state, id, &tracker, request.into(), Some(e.to_string()));
            (StatusCode::BAD_REQUEST, page).into_response()
        }
    }
}

pub async fn reset(State(state): State<AppState>, Path(id): Path<Uuid>) -> Redirect {
    match state.sessions.get(id).await {
        Some(tracker) => {
            tracker.reset();
            Redirect::to(&session_url(id))
        }
        None => Redirect::to("/"),
    }
}
