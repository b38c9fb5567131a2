use serde::{Deserialize, Serialize};

use crate::navigation::GeoPoint;
use crate::tracker::TrackerStatus;

use super::ledger::{ledger, LedgerRow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RouteLabels {
    pub origin: String,
    pub destination: String,
}

impl Default for RouteLabels {
    fn default() -> Self {
        Self {
            origin: "Departure".to_string(),
            destination: "Destination".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Origin,
    Destination,
    Record,
}

impl MarkerKind {
    pub fn color(&self) -> &'static str {
        match self {
            MarkerKind::Origin => "blue",
            MarkerKind::Destination => "red",
            MarkerKind::Record => "green",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Marker {
    pub kind: MarkerKind,
    pub label: String,
    pub position: GeoPoint,
    pub color: String,
    pub popup: Vec<String>,
}

impl Marker {
    fn new(kind: MarkerKind, label: String, position: GeoPoint, popup: Vec<String>) -> Self {
        Self {
            kind,
            label,
            position,
            color: kind.color().to_string(),
            popup,
        }
    }
}

/// Everything a map/table front-end needs to draw the voyage.
///
/// The track is drawn as straight segments origin, records..., destination.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct RouteView {
    /// Latest record, or the origin before the first report.
    pub center: GeoPoint,
    pub markers: Vec<Marker>,
    pub polyline: Vec<GeoPoint>,
    pub ledger: Vec<LedgerRow>,
}

impl RouteView {
    pub fn from_status(status: &TrackerStatus, labels: &RouteLabels) -> Self {
        let waypoints = status.waypoints;
        let rows = ledger(&status.entries);

        let mut markers = Vec::with_capacity(status.entries.len() + 2);
        markers.push(Marker::new(
            MarkerKind::Origin,
            labels.origin.clone(),
            waypoints.origin,
            vec![labels.origin.clone()],
        ));
        markers.push(Marker::new(
            MarkerKind::Destination,
            labels.destination.clone(),
            waypoints.destination,
            vec![labels.destination.clone()],
        ));
        for (entry, row) in status.entries.iter().zip(&rows) {
            markers.push(Marker::new(
                MarkerKind::Record,
                format!("Record {}", row.record),
                entry.position,
                row.popup_lines(),
            ));
        }

        let mut polyline = Vec::with_capacity(status.entries.len() + 2);
        polyline.push(waypoints.origin);
        polyline.extend(status.entries.iter().map(|e| e.position));
        polyline.push(waypoints.destination);

        let center = status
            .last()
            .map(|e| e.position)
            .unwrap_or(waypoints.origin);

        Self {
            center,
            markers,
            polyline,
            ledger: rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::FixedWaypoints;
    use crate::tracker::{Tracker, TrackerSettings};

    #[test]
    fn empty_route() {
        let tracker = Tracker::new(FixedWaypoints::default(), TrackerSettings::default());
        let view = RouteView::from_status(&tracker.status(), &RouteLabels::default());

        let waypoints = FixedWaypoints::default();
        assert!(view.is_empty());
        assert_eq!(view.center, waypoints.origin);
        assert_eq!(view.polyline, vec![waypoints.origin, waypoints.destination]);
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.markers[0].color, "blue");
        assert_eq!(view.markers[1].color, "red");
    }

    #[test]
    fn route_with_records() {
        let tracker = Tracker::new(FixedWaypoints::default(), TrackerSettings::default());
        tracker.submit_position(33.0, 30.0, 9.0, 100.0).unwrap();
        tracker.submit_position(31.9621, 33.2487, 8.86, 112.5).unwrap();

        let labels = RouteLabels {
            origin: "Catania".to_string(),
            destination: "Gaza".to_string(),
        };
        let view = RouteView::from_status(&tracker.status(), &labels);

        let waypoints = tracker.waypoints();
        assert_eq!(
            view.polyline,
            vec![
                waypoints.origin,
                GeoPoint::new(33.0, 30.0),
                GeoPoint::new(31.9621, 33.2487),
                waypoints.destination,
            ]
        );
        assert_eq!(view.center, GeoPoint::new(31.9621, 33.2487));

        let labels: Vec<_> = view.markers.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Catania", "Gaza", "Record 1", "Record 2"]);
        assert_eq!(view.markers[3].kind, MarkerKind::Record);
        assert_eq!(view.markers[3].color, "green");
        assert_eq!(view.markers[3].popup.len(), 6);
        assert_eq!(view.ledger.len(), 2);
    }

    #[test]
    fn crawling_vessel_still_renders() {
        let tracker = Tracker::new(FixedWaypoints::default(), TrackerSettings::default());
        let entry = tracker.submit_position(31.9621, 33.2487, 1e-15, 112.5).unwrap();
        assert!(entry.eta.hours().is_some());

        let view = RouteView::from_status(&tracker.status(), &RouteLabels::default());
        assert_eq!(view.ledger.len(), 1);
        assert_eq!(view.ledger[0].eta_duration, "∞");
    }
}
