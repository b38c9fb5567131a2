use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::NavigationError;
use super::geo::knots_to_kmh;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parses `"lat, lon"` in decimal degrees.
    pub fn from_coordinates(coordinates: &str) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return None;
        }
        let lat = parts[0].parse().ok()?;
        let lon = parts[1].parse().ok()?;
        Some(Self::new(lat, lon))
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Start and end of the voyage. Fixed for the lifetime of a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FixedWaypoints {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

impl Default for FixedWaypoints {
    fn default() -> Self {
        Self {
            origin: GeoPoint::new(37.2311, 15.2242),
            destination: GeoPoint::new(31.5, 34.47),
        }
    }
}

/// A raw position report as typed in by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PositionReport {
    pub position: GeoPoint,
    pub speed_knots: f64,
    pub course_degrees: f64,
}

impl PositionReport {
    pub fn new(latitude: f64, longitude: f64, speed_knots: f64, course_degrees: f64) -> Self {
        Self {
            position: GeoPoint::new(latitude, longitude),
            speed_knots,
            course_degrees,
        }
    }

    /// Checks every field against its physical range.
    pub fn validate(&self) -> Result<(), NavigationError> {
        check_range("latitude", self.position.latitude, -90.0, 90.0, "[-90, 90]")?;
        check_range("longitude", self.position.longitude, -180.0, 180.0, "[-180, 180]")?;

        if !self.speed_knots.is_finite() || self.speed_knots < 0.0 {
            return Err(NavigationError::InvalidInput {
                field: "speed_knots",
                value: self.speed_knots,
                expected: ">= 0",
            });
        }

        if !self.course_degrees.is_finite()
            || self.course_degrees < 0.0
            || self.course_degrees >= 360.0
        {
            return Err(NavigationError::InvalidInput {
                field: "course_degrees",
                value: self.course_degrees,
                expected: "[0, 360)",
            });
        }

        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) -> Result<(), NavigationError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(NavigationError::InvalidInput {
            field,
            value,
            expected,
        })
    }
}

/// Time left to the destination at the current speed.
///
/// A stopped vessel never arrives, which is modelled as `Unbounded` rather
/// than a floating-point infinity. A quotient that is not finite (unchecked
/// NaN input, or a speed so small the division overflows) is `Unbounded` too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Eta {
    Finite { hours: f64 },
    Unbounded,
}

impl Eta {
    pub fn from_distance(distance_km: f64, speed_kmh: f64) -> Self {
        let hours = distance_km / speed_kmh;
        if speed_kmh > 0.0 && hours.is_finite() {
            Eta::Finite { hours }
        } else {
            Eta::Unbounded
        }
    }

    pub fn hours(&self) -> Option<f64> {
        match self {
            Eta::Finite { hours } => Some(*hours),
            Eta::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Eta::Unbounded)
    }
}

/// A log entry: the report plus everything derived from it at acceptance time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EnrichedPosition {
    pub timestamp: DateTime<Utc>,
    pub position: GeoPoint,
    pub speed_knots: f64,
    pub course_degrees: f64,
    pub remaining_distance_km: f64,
    pub eta: Eta,
    pub bearing_to_destination_degrees: f64,
}

impl EnrichedPosition {
    pub fn speed_kmh(&self) -> f64 {
        knots_to_kmh(self.speed_knots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates() {
        let p = GeoPoint::from_coordinates(" 37.2311 , 15.2242 ").unwrap();
        assert_eq!(p, GeoPoint::new(37.2311, 15.2242));

        assert!(GeoPoint::from_coordinates("37.2311").is_none());
        assert!(GeoPoint::from_coordinates("1, 2, 3").is_none());
        assert!(GeoPoint::from_coordinates("north, east").is_none());
    }

    #[test]
    fn geo_point_range() {
        assert!(GeoPoint::new(90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn report_validation() {
        assert!(PositionReport::new(31.9621, 33.2487, 8.86, 112.5)
            .validate()
            .is_ok());
        assert!(PositionReport::new(0.0, 0.0, 0.0, 0.0).validate().is_ok());

        let err = PositionReport::new(91.0, 0.0, 5.0, 0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            NavigationError::InvalidInput {
                field: "latitude",
                ..
            }
        ));

        let err = PositionReport::new(0.0, 0.0, -1.0, 0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            NavigationError::InvalidInput {
                field: "speed_knots",
                ..
            }
        ));

        let err = PositionReport::new(0.0, 0.0, 1.0, 360.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            NavigationError::InvalidInput {
                field: "course_degrees",
                ..
            }
        ));

        assert!(PositionReport::new(0.0, f64::INFINITY, 1.0, 0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn eta_from_distance() {
        assert_eq!(Eta::from_distance(100.0, 50.0), Eta::Finite { hours: 2.0 });
        assert_eq!(Eta::from_distance(100.0, 0.0), Eta::Unbounded);
        assert_eq!(Eta::from_distance(100.0, -3.0), Eta::Unbounded);
        assert_eq!(Eta::Unbounded.hours(), None);
        assert!(Eta::Unbounded.is_unbounded());
    }

    #[test]
    fn non_finite_eta_is_unbounded() {
        assert_eq!(Eta::from_distance(f64::NAN, 10.0), Eta::Unbounded);
        assert_eq!(Eta::from_distance(100.0, f64::NAN), Eta::Unbounded);
        assert_eq!(Eta::from_distance(1e300, 1e-300), Eta::Unbounded);
    }

    #[test]
    fn eta_serializes_tagged() {
        let json = serde_json::to_value(Eta::Unbounded).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "unbounded" }));

        let json = serde_json::to_value(Eta::Finite { hours: 1.5 }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "finite", "hours": 1.5 }));
    }
}
