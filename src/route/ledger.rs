use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use crate::navigation::{EnrichedPosition, Eta};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// `"7.70 h"`, or `"∞"` when the vessel is not making way.
pub fn format_eta(eta: &Eta) -> String {
    match eta {
        Eta::Finite { hours } => format!("{:.2} h", hours),
        Eta::Unbounded => "∞".to_string(),
    }
}

/// Human readable ETA rounded to the minute, e.g. `"7h 42m"`.
///
/// ETAs too long to express as a [`Duration`] in seconds read `"∞"`.
pub fn format_eta_duration(eta: &Eta) -> String {
    match eta {
        Eta::Finite { hours } => {
            let minutes = (hours * 60.0).round();
            if !minutes.is_finite() || minutes >= MAX_ETA_MINUTES as f64 {
                return "∞".to_string();
            }
            let minutes = minutes.max(0.0) as u64;
            if minutes == 0 {
                return "0m".to_string();
            }
            humantime::format_duration(Duration::from_secs(minutes.saturating_mul(60))).to_string()
        }
        Eta::Unbounded => "∞".to_string(),
    }
}

const MAX_ETA_MINUTES: u64 = u64::MAX / 60;

/// One table row, every column already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct LedgerRow {
    pub record: usize,
    pub timestamp: String,
    pub latitude: String,
    pub longitude: String,
    pub speed_knots: String,
    pub course_degrees: String,
    pub remaining_distance_km: String,
    pub eta: String,
    pub eta_duration: String,
    pub bearing_degrees: String,
}

impl LedgerRow {
    pub fn from_entry(record: usize, entry: &EnrichedPosition) -> Self {
        Self {
            record,
            timestamp: format_timestamp(&entry.timestamp),
            latitude: format!("{:.4}", entry.position.latitude),
            longitude: format!("{:.4}", entry.position.longitude),
            speed_knots: format!("{:.2}", entry.speed_knots),
            course_degrees: format!("{:.2}", entry.course_degrees),
            remaining_distance_km: format!("{:.2}", entry.remaining_distance_km),
            eta: format_eta(&entry.eta),
            eta_duration: format_eta_duration(&entry.eta),
            bearing_degrees: format!("{:.2}", entry.bearing_to_destination_degrees),
        }
    }

    /// Popup lines for the record's map marker.
    pub fn popup_lines(&self) -> Vec<String> {
        vec![
            format!("Time: {}", self.timestamp),
            format!("Speed: {} kn", self.speed_knots),
            format!("Course: {}°", self.course_degrees),
            format!("Distance: {} km", self.remaining_distance_km),
            format!("ETA: {}", self.eta),
            format!("Bearing: {}°", self.bearing_degrees),
        ]
    }
}

pub fn ledger(entries: &[EnrichedPosition]) -> Vec<LedgerRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| LedgerRow::from_entry(i + 1, entry))
        .collect()
}
