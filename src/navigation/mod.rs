mod calculator;
mod error;
mod geo;
mod types;

pub use calculator::enrich;
pub use error::NavigationError;
pub use geo::{
    distance_km, initial_bearing_deg, knots_to_kmh, normalize_degrees, EARTH_RADIUS_KM,
    KMH_PER_KNOT,
};
pub use types::{EnrichedPosition, Eta, FixedWaypoints, GeoPoint, PositionReport};
