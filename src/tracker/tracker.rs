use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::logbook::PositionLog;
use crate::navigation::{enrich, EnrichedPosition, FixedWaypoints, PositionReport};

use super::error::TrackerError;
use super::types::{InputPolicy, Record, TrackerSettings, TrackerStatus};

/// One voyage session: fixed waypoints plus the position log they apply to.
///
/// Submissions are serialized on an internal lock, so a tracker can be
/// shared between request handlers. Readers always get an owned snapshot.
#[derive(Debug)]
pub struct Tracker {
    waypoints: FixedWaypoints,
    settings: TrackerSettings,
    log: Mutex<PositionLog>,
}

impl Tracker {
    pub fn new(waypoints: FixedWaypoints, settings: TrackerSettings) -> Self {
        Self {
            waypoints,
            settings,
            log: Mutex::new(PositionLog::with_max_entries(settings.max_entries)),
        }
    }

    pub fn waypoints(&self) -> FixedWaypoints {
        self.waypoints
    }

    /// Logs a report observed now.
    pub fn submit_position(
        &self,
        latitude: f64,
        longitude: f64,
        speed_knots: f64,
        course_degrees: f64,
    ) -> Result<EnrichedPosition, TrackerError> {
        let report = PositionReport::new(latitude, longitude, speed_knots, course_degrees);
        self.submit_report(report, Utc::now())
            .map(|record| record.entry)
    }

    /// Validates, enriches and appends `report` as one step.
    pub fn submit_report(
        &self,
        report: PositionReport,
        observed_at: DateTime<Utc>,
    ) -> Result<Record, TrackerError> {
        if self.settings.input_policy == InputPolicy::Reject {
            if let Err(e) = report.validate() {
                log::warn!("Rejected position report: {}", e);
                return Err(e.into());
            }
        }

        let mut positions = self.locked();
        let entry = enrich(report, self.waypoints.destination, observed_at);
        let number = positions.append(entry.clone())?;

        log::debug!(
            "Record {} at {}: {:.2} km to go, bearing {:.1}",
            number,
            entry.position,
            entry.remaining_distance_km,
            entry.bearing_to_destination_degrees
        );

        Ok(Record { number, entry })
    }

    pub fn log(&self) -> Vec<EnrichedPosition> {
        self.locked().all().to_vec()
    }

    pub fn last(&self) -> Option<EnrichedPosition> {
        self.locked().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.locked().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locked().is_empty()
    }

    pub fn status(&self) -> TrackerStatus {
        TrackerStatus {
            waypoints: self.waypoints,
            entries: self.log(),
        }
    }

    /// Replaces the log with an empty one. Previous entries are discarded.
    pub fn reset(&self) {
        let mut positions = self.locked();
        let discarded = positions.len();
        *positions = positions.fresh();
        log::info!("Position log reset ({} entries discarded)", discarded);
    }

    fn locked(&self) -> MutexGuard<'_, PositionLog> {
        // appends never panic mid-update, so a poisoned log is still consistent
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logbook::LogbookError;
    use crate::navigation::{Eta, NavigationError};
    use chrono::Duration;
    use std::sync::Arc;
    use std::thread;

    fn tracker() -> Tracker {
        Tracker::new(FixedWaypoints::default(), TrackerSettings::default())
    }

    #[test]
    fn reference_submission() {
        let tracker = tracker();
        assert!(tracker.is_empty());

        let entry = tracker
            .submit_position(31.9621, 33.2487, 8.86, 112.5)
            .unwrap();

        assert!((entry.remaining_distance_km - 126.42).abs() < 0.01);
        assert!((entry.speed_kmh() - 16.42).abs() < 0.02);
        let hours = entry.eta.hours().unwrap();
        assert!((hours - entry.remaining_distance_km / entry.speed_kmh()).abs() < 1e-12);
        assert!((0.0..360.0).contains(&entry.bearing_to_destination_degrees));

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.last(), Some(entry));
    }

    #[test]
    fn sequential_submissions_keep_order() {
        let tracker = tracker();
        let first = tracker.submit_position(32.0, 33.0, 8.0, 110.0).unwrap();
        let second = tracker.submit_position(31.9, 33.4, 9.0, 112.0).unwrap();

        let log = tracker.log();
        assert_eq!(log, vec![first.clone(), second.clone()]);
        assert!(first.timestamp <= second.timestamp);
    }

    #[test]
    fn record_numbers_and_supplied_time() {
        let tracker = tracker();
        let at = Utc::now() - Duration::hours(3);

        let r1 = tracker
            .submit_report(PositionReport::new(32.0, 33.0, 8.0, 110.0), at)
            .unwrap();
        let r2 = tracker
            .submit_report(PositionReport::new(32.0, 33.1, 8.0, 110.0), at)
            .unwrap();

        assert_eq!(r1.number, 1);
        assert_eq!(r2.number, 2);
        assert_eq!(r1.entry.timestamp, at);
        assert_eq!(r1.entry.timestamp, r2.entry.timestamp);
    }

    #[test]
    fn zero_speed_is_logged_with_unbounded_eta() {
        let tracker = tracker();
        let entry = tracker.submit_position(32.0, 33.0, 0.0, 0.0).unwrap();
        assert_eq!(entry.eta, Eta::Unbounded);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn invalid_input_is_not_logged() {
        let tracker = tracker();
        let err = tracker.submit_position(95.0, 33.0, 8.0, 110.0).unwrap_err();

        assert!(matches!(
            err,
            TrackerError::InvalidInput(NavigationError::InvalidInput {
                field: "latitude",
                ..
            })
        ));
        assert!(tracker.is_empty());
    }

    #[test]
    fn trust_policy_passes_input_through() {
        let tracker = Tracker::new(
            FixedWaypoints::default(),
            TrackerSettings {
                input_policy: InputPolicy::Trust,
                max_entries: None,
            },
        );
        tracker.submit_position(32.0, 33.0, -4.0, 400.0).unwrap();
        assert_eq!(tracker.last().unwrap().eta, Eta::Unbounded);

        let entry = tracker.submit_position(f64::NAN, 33.0, 8.0, 110.0).unwrap();
        assert_eq!(entry.eta, Eta::Unbounded);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn capacity_exceeded_leaves_log_unchanged() {
        let tracker = Tracker::new(
            FixedWaypoints::default(),
            TrackerSettings {
                input_policy: InputPolicy::Reject,
                max_entries: Some(1),
            },
        );
        tracker.submit_position(32.0, 33.0, 8.0, 110.0).unwrap();
        let before = tracker.log();

        let err = tracker.submit_position(32.1, 33.0, 8.0, 110.0).unwrap_err();
        assert_eq!(err, TrackerError::Logbook(LogbookError::CapacityExceeded(1)));
        assert_eq!(tracker.log(), before);
    }

    #[test]
    fn reset_starts_a_fresh_log() {
        let tracker = tracker();
        tracker.submit_position(32.0, 33.0, 8.0, 110.0).unwrap();
        let snapshot = tracker.log();

        tracker.reset();

        assert!(tracker.is_empty());
        assert!(tracker.last().is_none());
        assert_eq!(snapshot.len(), 1);
        assert_eq!(tracker.waypoints(), FixedWaypoints::default());
    }

    #[test]
    fn concurrent_submissions_are_serialized() {
        let tracker = Arc::new(tracker());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let tracker = tracker.clone();
                thread::spawn(move || {
                    for j in 0..25 {
                        tracker
                            .submit_position(32.0 + i as f64 * 0.01, 33.0 + j as f64 * 0.01, 8.0, 90.0)
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tracker.len(), 200);
    }

    #[test]
    fn status_snapshot() {
        let tracker = tracker();
        tracker.submit_position(32.0, 33.0, 8.0, 110.0).unwrap();

        let status = tracker.status();
        assert_eq!(status.waypoints, tracker.waypoints());
        assert_eq!(status.entries.len(), 1);
        assert_eq!(status.last(), tracker.last().as_ref());
        assert_eq!(tracker.status(), status);
    }
}
