//! Manual vessel position log.
//!
//! Operators submit position reports; each one is enriched with the
//! great-circle distance, initial bearing and ETA to a fixed destination and
//! appended to a per-session log. The `web` and `console` front-ends render
//! that log through the shared [`route`] view model.

pub mod config;
pub mod console;
pub mod logbook;
pub mod navigation;
pub mod route;
pub mod tracker;
pub mod web;

pub use config::{Config, ConfigError};
pub use logbook::{LogbookError, PositionLog};
pub use navigation::{EnrichedPosition, Eta, FixedWaypoints, GeoPoint, PositionReport};
pub use tracker::{InputPolicy, Record, Tracker, TrackerError, TrackerSettings, TrackerStatus};
