use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::{Config, ConfigError};
use crate::navigation::FixedWaypoints;
use crate::route::RouteLabels;
use crate::tracker::{Tracker, TrackerSettings};

use super::api::error::ApiError;

/// Bounds on the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Sessions kept at once; the least recently used one is evicted beyond it.
    pub max_sessions: usize,
    /// Sessions not looked up for this long are dropped.
    pub idle_timeout: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            idle_timeout: Duration::from_secs(12 * 60 * 60),
        }
    }
}

#[derive(Debug)]
struct Session {
    tracker: Arc<Tracker>,
    last_seen: Instant,
}

impl Session {
    fn is_idle(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) >= timeout
    }
}

/// Independent voyage sessions, each owning its own tracker and log.
#[derive(Debug)]
pub struct Sessions {
    waypoints: FixedWaypoints,
    settings: TrackerSettings,
    limits: SessionLimits,
    trackers: RwLock<HashMap<Uuid, Session>>,
}

impl Sessions {
    pub fn new(waypoints: FixedWaypoints, settings: TrackerSettings, limits: SessionLimits) -> Self {
        Self {
            waypoints,
            settings,
            limits,
            trackers: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self) -> (Uuid, Arc<Tracker>) {
        self.create_at(Instant::now()).await
    }

    /// Looks up a live session and marks it as used.
    pub async fn get(&self, id: Uuid) -> Option<Arc<Tracker>> {
        self.get_at(id, Instant::now()).await
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.trackers.write().await.remove(&id).is_some();
        if removed {
            log::info!("Session {} closed", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.trackers.read().await.len()
    }

    async fn create_at(&self, now: Instant) -> (Uuid, Arc<Tracker>) {
        let id = Uuid::new_v4();
        let tracker = Arc::new(Tracker::new(self.waypoints, self.settings));

        let mut trackers = self.trackers.write().await;
        self.evict(&mut trackers, now);
        trackers.insert(
            id,
            Session {
                tracker: tracker.clone(),
                last_seen: now,
            },
        );
        log::info!("Session {} created ({} active)", id, trackers.len());
        (id, tracker)
    }

    async fn get_at(&self, id: Uuid, now: Instant) -> Option<Arc<Tracker>> {
        let mut trackers = self.trackers.write().await;
        let session = trackers.get_mut(&id)?;
        if session.is_idle(now, self.limits.idle_timeout) {
            trackers.remove(&id);
            log::info!("Session {} expired", id);
            return None;
        }
        session.last_seen = now;
        Some(session.tracker.clone())
    }

    /// Drops idle sessions, then the least recently used ones until a new
    /// session fits under `max_sessions`.
    fn evict(&self, trackers: &mut HashMap<Uuid, Session>, now: Instant) {
        let before = trackers.len();
        trackers.retain(|_, session| !session.is_idle(now, self.limits.idle_timeout));

        while !trackers.is_empty() && trackers.len() >= self.limits.max_sessions {
            let oldest = trackers
                .iter()
                .min_by_key(|(_, session)| session.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    trackers.remove(&id);
                }
                None => break,
            }
        }

        let evicted = before - trackers.len();
        if evicted > 0 {
            log::info!("Evicted {} idle or excess sessions", evicted);
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub waypoints: FixedWaypoints,
    pub labels: Arc<RouteLabels>,
    pub sessions: Arc<Sessions>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let waypoints = config.waypoints()?;
        let sessions = Sessions::new(
            waypoints,
            config.tracker_settings(),
            config.session_limits()?,
        );
        Ok(Self {
            labels: Arc::new(config.labels()),
            config: Arc::new(config),
            waypoints,
            sessions: Arc::new(sessions),
        })
    }

    pub async fn tracker(&self, id: Uuid) -> Result<Arc<Tracker>, ApiError> {
        self.sessions.get(id).await.ok_or(ApiError::NotFound)
    }
}
