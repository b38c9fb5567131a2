use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::positions::PositionRequest;
use super::api::sessions::{SessionResponse, WaypointsResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::sessions::get_waypoints,
        super::api::sessions::create_session,
        super::api::sessions::get_session,
        super::api::sessions::delete_session,
        super::api::sessions::reset_session,
        super::api::sessions::get_route,
        super::api::positions::submit_position,
        super::api::positions::list_positions,
        super::api::positions::last_position,
    ),
    components(
        schemas(
            ErrorResponse,
            PositionRequest,
            SessionResponse,
            WaypointsResponse,
            crate::navigation::GeoPoint,
            crate::navigation::FixedWaypoints,
            crate::navigation::Eta,
            crate::navigation::EnrichedPosition,
            crate::tracker::Record,
            crate::route::RouteView,
            crate::route::Marker,
            crate::route::MarkerKind,
            crate::route::LedgerRow,
            crate::route::RouteLabels,
        )
    ),
    info(
        title = "Voyage Log API",
        description = "Manual position log with distance, bearing and ETA to a fixed destination",
        version = "0.1.0"
    ),
    tags(
        (name = "sessions", description = "Voyage sessions and rendering data"),
        (name = "positions", description = "Position log")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/api/waypoints",
            "/api/sessions",
            "/api/sessions/{id}",
            "/api/sessions/{id}/reset",
            "/api/sessions/{id}/route",
            "/api/sessions/{id}/positions",
            "/api/sessions/{id}/positions/last",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }
}
