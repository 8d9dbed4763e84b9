// src/feed/mod.rs
pub mod aggregate;
pub mod client;
pub mod controller;
pub mod error;
pub mod kinds;
pub mod rotation;
pub mod types;

use metrics::{describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on the consumer's
/// exporter, whichever one it installs).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "feed_refresh_total",
            "Refresh cycles that published live records."
        );
        describe_counter!(
            "feed_fallback_total",
            "Refresh cycles that degraded to fallback records."
        );
        describe_counter!(
            "feed_refresh_skipped_total",
            "Refresh ticks suppressed by the in-flight guard."
        );
        describe_counter!("feed_fetch_errors_total", "Fetch/parse errors.");
        describe_histogram!("feed_fetch_ms", "Fetch round-trip time in milliseconds.");
        describe_gauge!(
            "feed_last_publish_ts",
            "Unix ts when a feed last published records."
        );
    });
}
