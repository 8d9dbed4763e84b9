// src/feed/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where a record came from. A publish cycle never mixes the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Live,
    Fallback,
}

/// One displayable unit from a feed. `payload` carries the feed-specific
/// fields (image URL + coordinates, or flare class + times); `derived`
/// carries computed display values (intensity, color key). Both feed
/// kinds publish this one shape so the view layer needs no branching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub source_kind: SourceKind,
    pub payload: Map<String, Value>,
    pub derived: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    Idle,
    Loading,
    Ready,
    Degraded,
}

/// Failure class surfaced to the view layer alongside degraded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Parse,
    EmptyResult,
}

/// Per-feed controller state, published wholesale on every cycle.
///
/// Invariant: `status == Degraded` implies `error` is set and every
/// record is `SourceKind::Fallback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedState {
    pub status: FeedStatus,
    pub records: Vec<FeedRecord>,
    pub last_updated: Option<DateTime<Utc>>,
    pub error: Option<ErrorKind>,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            status: FeedStatus::Idle,
            records: Vec::new(),
            last_updated: None,
            error: None,
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}
