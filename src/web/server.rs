use axum::{routing::delete, routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::positions as position_handlers;
use super::api::sessions as session_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::new_session))
        .route("/sessions/{id}", get(ui_handlers::session_page))
        .route(
            "/sessions/{id}/positions",
            post(ui_handlers::submit_position),
        )
        .route("/sessions/{id}/reset", post(ui_handlers::reset))
        // Session API endpoints
        .route("/api/waypoints", get(session_handlers::get_waypoints))
        .route("/api/sessions", post(session_handlers::create_session))
        .route("/api/sessions/{id}", get(session_handlers::get_session))
        .route(
            "/api/sessions/{id}",
            delete(session_handlers::delete_session),
        )
        .route(
            "/api/sessions/{id}/reset",
            post(session_handlers::reset_session),
        )
        .route("/api/sessions/{id}/route", get(session_handlers::get_route))
        // Position API endpoints
        .route(
            "/api/sessions/{id}/positions",
            post(position_handlers::submit_position),
        )
        .route(
            "/api/sessions/{id}/positions",
            get(position_handlers::list_positions),
        )
        .route(
            "/api/sessions/{id}/positions/last",
            get(position_handlers::last_position),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(state: AppState) -> std::io::Result<()> {
    let bind_addr = state.config.web.bind.clone();
    let waypoints = state.waypoints;
    let app = router(state);

    log::info!(
        "Starting server on {} (origin {}, destination {})",
        bind_addr,
        waypoints.origin,
        waypoints.destination
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
