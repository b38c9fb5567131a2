use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::navigation::{FixedWaypoints, GeoPoint};
use crate::route::RouteLabels;
use crate::tracker::{InputPolicy, TrackerSettings};
use crate::web::SessionLimits;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid {field} coordinates: {value:?} (expected \"lat, lon\" in range)")]
    InvalidCoordinates { field: &'static str, value: String },
    #[error("invalid session_idle_timeout {value:?}: {source}")]
    InvalidDuration {
        value: String,
        source: humantime::DurationError,
    },
    #[error("max_sessions must be at least 1")]
    NoSessions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub route: RouteConfig,
    pub logbook: LogbookConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub origin: String,
    pub origin_label: String,
    pub destination: String,
    pub destination_label: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        let waypoints = FixedWaypoints::default();
        let labels = RouteLabels::default();
        Self {
            origin: format_coordinates(waypoints.origin),
            origin_label: labels.origin,
            destination: format_coordinates(waypoints.destination),
            destination_label: labels.destination,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogbookConfig {
    pub input_policy: InputPolicy,
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// e.g. "12h", "30m"
    #[serde(default = "default_session_idle_timeout")]
    pub session_idle_timeout: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_sessions: default_max_sessions(),
            session_idle_timeout: default_session_idle_timeout(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_sessions() -> usize {
    SessionLimits::default().max_sessions
}

fn default_session_idle_timeout() -> String {
    humantime::format_duration(SessionLimits::default().idle_timeout).to_string()
}

fn format_coordinates(point: GeoPoint) -> String {
    format!("{}, {}", point.latitude, point.longitude)
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // an empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.waypoints()?;
        config.session_limits()?;
        Ok(config)
    }

    pub fn waypoints(&self) -> Result<FixedWaypoints, ConfigError> {
        Ok(FixedWaypoints {
            origin: parse_waypoint("origin", &self.route.origin)?,
            destination: parse_waypoint("destination", &self.route.destination)?,
        })
    }

    pub fn labels(&self) -> RouteLabels {
        RouteLabels {
            origin: self.route.origin_label.clone(),
            destination: self.route.destination_label.clone(),
        }
    }

    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            input_policy: self.logbook.input_policy,
            max_entries: self.logbook.max_entries,
        }
    }

    pub fn session_limits(&self) -> Result<SessionLimits, ConfigError> {
        if self.web.max_sessions == 0 {
            return Err(ConfigError::NoSessions);
        }
        let timeout = &self.web.session_idle_timeout;
        let idle_timeout = humantime::parse_duration(timeout.trim()).map_err(|source| {
            ConfigError::InvalidDuration {
                value: timeout.clone(),
                source,
            }
        })?;
        Ok(SessionLimits {
            max_sessions: self.web.max_sessions,
            idle_timeout,
        })
    }
}

fn parse_waypoint(field: &'static str, value: &str) -> Result<GeoPoint, ConfigError> {
    GeoPoint::from_coordinates(value)
        .filter(GeoPoint::is_valid)
        .ok_or_else(|| ConfigError::InvalidCoordinates {
            field,
            value: value.to_string(),
        })
}
