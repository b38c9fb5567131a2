use askama::Template;
use askama_web::WebTemplate;

use crate::route::{LedgerRow, RouteLabels, RouteView};
use crate::web::api::positions::PositionRequest;

/// Values shown in the input form.
#[derive(Debug, Clone)]
pub struct FormValues {
    pub latitude: String,
    pub longitude: String,
    pub speed_knots: String,
    pub course_degrees: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            latitude: "31.9621".to_string(),
            longitude: "33.2487".to_string(),
            speed_knots: "8.86".to_string(),
            course_degrees: "112.5".to_string(),
        }
    }
}

impl From<PositionRequest> for FormValues {
    fn from(request: PositionRequest) -> Self {
        Self {
            latitude: request.latitude.to_string(),
            longitude: request.longitude.to_string(),
            speed_knots: request.speed_knots.to_string(),
            course_degrees: request.course_degrees.to_string(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "session.html")]
pub struct SessionTemplate {
    pub session_id: String,
    pub origin_label: String,
    pub destination_label: String,
    pub form: FormValues,
    pub error: Option<String>,
    pub rows: Vec<LedgerRow>,
    pub route_json: String,
}

impl SessionTemplate {
    pub fn new(
        session_id: String,
        labels: &RouteLabels,
        view: RouteView,
        form: FormValues,
        error: Option<String>,
    ) -> Self {
        // embedded in a <script> block
        let route_json = match serde_json::to_string(&view) {
            Ok(json) => json.replace("</", "<\\/"),
            Err(e) => {
                log::error!("Failed to encode route for session {}: {}", session_id, e);
                "null".to_string()
            }
        };

        Self {
            session_id,
            origin_label: labels.origin.clone(),
            destination_label: labels.destination.clone(),
            form,
            error,
            rows: view.ledger,
            route_json,
        }
    }
}
