use serde::{Deserialize, Serialize};

use crate::navigation::{EnrichedPosition, FixedWaypoints};

/// What to do with reports outside their physical ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Refuse the report; nothing is logged.
    #[default]
    Reject,
    /// Log whatever the front-end sends. A NaN coordinate yields a NaN
    /// distance (JSON `null`) and an `Unbounded` ETA.
    Trust,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerSettings {
    pub input_policy: InputPolicy,
    pub max_entries: Option<usize>,
}

/// An accepted entry together with its position in the log.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Record {
    /// 1-based, as shown in "Record N" labels.
    pub number: usize,
    pub entry: EnrichedPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct TrackerStatus {
    pub waypoints: FixedWaypoints,
    pub entries: Vec<EnrichedPosition>,
}

impl TrackerStatus {
    pub fn last(&self) -> Option<&EnrichedPosition> {
        self.entries.last()
    }
}
