//! Demo that drives both live feeds for a few seconds and prints their
//! published state. Needs network access to the NASA API; without it the
//! panels switch to clearly-flagged fallback data, which is the point.

use astro_feed_engine::{DashboardConfig, DonkiFeed, EpicFeed, FeedController, HttpFetchClient};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = DashboardConfig::default_seed();
    let mut imagery = FeedController::new(
        Box::new(EpicFeed),
        Box::new(HttpFetchClient::new()),
        cfg.clone(),
    );
    let mut solar = FeedController::new(
        Box::new(DonkiFeed),
        Box::new(HttpFetchClient::new()),
        cfg,
    );

    imagery.start();
    solar.start();

    for _ in 0..3 {
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
        for (label, ctrl) in [("imagery", &imagery), ("solar", &solar)] {
            let s = ctrl.snapshot();
            let (idx, len) = ctrl.cursor_position();
            println!(
                "{label}: {:?}, {} records, cursor {}/{}, error {:?}",
                s.status,
                s.records.len(),
                idx + 1,
                len.max(1),
                s.error
            );
        }
    }

    imagery.stop();
    solar.stop();
    println!("feed-demo done");
}
