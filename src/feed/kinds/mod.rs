// src/feed/kinds/mod.rs
pub mod donki;
pub mod epic;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde_json::Value;

use crate::config::DashboardConfig;
use crate::feed::types::FeedRecord;

/// Per-feed capability: endpoint + default query params + normalization
/// + fallback synthesis, so the controller never branches on feed type.
///
/// `normalize` returning an empty sequence is a valid outcome (distinct
/// from a fetch error); the controller treats it as "no usable records"
/// and degrades. `fallback` must produce records structurally identical
/// to `normalize` output for the same kind.
pub trait FeedKind: Send + Sync {
    fn name(&self) -> &'static str;

    fn endpoint(&self, cfg: &DashboardConfig) -> String;

    /// Feed-specific query params; the controller prepends `api_key`.
    fn query_params(&self, now: DateTime<Utc>) -> Vec<(String, String)>;

    fn refresh_interval_ms(&self, cfg: &DashboardConfig) -> u64;

    fn normalize(&self, cfg: &DashboardConfig, raw: &Value) -> Vec<FeedRecord>;

    fn fallback(
        &self,
        cfg: &DashboardConfig,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Vec<FeedRecord>;
}
