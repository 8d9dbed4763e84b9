// src/lib.rs
// Public library surface for the dashboard view layer and integration tests.

pub mod catalog;
pub mod config;
pub mod feed;

// ---- Re-exports for stable public API ----
pub use crate::config::DashboardConfig;
pub use crate::feed::aggregate::{daily_aggregates, DailyAggregate};
pub use crate::feed::client::{FetchClient, HttpFetchClient};
pub use crate::feed::controller::{FeedController, ROTATION_INTERVAL_MS};
pub use crate::feed::error::FeedError;
pub use crate::feed::kinds::{donki::DonkiFeed, epic::EpicFeed, FeedKind};
pub use crate::feed::rotation::RotationCursor;
pub use crate::feed::types::{ErrorKind, FeedRecord, FeedState, FeedStatus, SourceKind};
