use chrono::{DateTime, Utc};

use super::geo::{distance_km, initial_bearing_deg, knots_to_kmh};
use super::types::{EnrichedPosition, Eta, GeoPoint, PositionReport};

/// Derives distance, ETA and bearing to `destination` for a report.
///
/// Inputs are not range-checked here; see [`PositionReport::validate`].
pub fn enrich(
    report: PositionReport,
    destination: GeoPoint,
    observed_at: DateTime<Utc>,
) -> EnrichedPosition {
    let remaining_distance_km = distance_km(report.position, destination);
    let speed_kmh = knots_to_kmh(report.speed_knots);

    EnrichedPosition {
        timestamp: observed_at,
        position: report.position,
        speed_knots: report.speed_knots,
        course_degrees: report.course_degrees,
        remaining_distance_km,
        eta: Eta::from_distance(remaining_distance_km, speed_kmh),
        bearing_to_destination_degrees: initial_bearing_deg(report.position, destination),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn destination() -> GeoPoint {
        GeoPoint::new(31.5, 34.47)
    }

    #[test]
    fn reference_report() {
        let at = Utc.with_ymd_and_hms(2025, 9, 30, 12, 0, 0).unwrap();
        let report = PositionReport::new(31.9621, 33.2487, 8.86, 112.5);

        let entry = enrich(report, destination(), at);

        assert_eq!(entry.timestamp, at);
        assert_eq!(entry.position, report.position);
        assert_eq!(entry.speed_knots, 8.86);
        assert_eq!(entry.course_degrees, 112.5);
        assert!(
            (entry.remaining_distance_km - 126.416).abs() < 0.01,
            "{}",
            entry.remaining_distance_km
        );
        assert!((entry.speed_kmh() - 16.41).abs() < 0.01);

        let hours = entry.eta.hours().unwrap();
        assert!((hours - entry.remaining_distance_km / entry.speed_kmh()).abs() < 1e-12);
        assert!((hours - 7.704).abs() < 0.001);

        assert!((0.0..360.0).contains(&entry.bearing_to_destination_degrees));
        assert!((entry.bearing_to_destination_degrees - 113.66).abs() < 0.01);
    }

    #[test]
    fn stopped_vessel_has_unbounded_eta() {
        let entry = enrich(
            PositionReport::new(31.9621, 33.2487, 0.0, 0.0),
            destination(),
            Utc::now(),
        );
        assert_eq!(entry.eta, Eta::Unbounded);
        assert!(entry.remaining_distance_km > 0.0);
    }

    #[test]
    fn negative_speed_is_not_an_error() {
        let entry = enrich(
            PositionReport::new(31.9621, 33.2487, -2.0, 0.0),
            destination(),
            Utc::now(),
        );
        assert!(entry.eta.is_unbounded());
    }

    #[test]
    fn at_destination() {
        let entry = enrich(
            PositionReport::new(31.5, 34.47, 10.0, 90.0),
            destination(),
            Utc::now(),
        );
        assert!(entry.remaining_distance_km.abs() < 1e-9);
        assert_eq!(entry.eta, Eta::Finite { hours: 0.0 });
    }
}
