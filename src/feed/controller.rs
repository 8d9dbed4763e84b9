//! # Feed Controller
//! Orchestrates fetch → normalize → publish for one feed, owning its
//! `FeedState` and rotation cursor. Two independent timers per feed: a
//! refresh timer at the configured cadence and a faster rotation timer.
//! Both are cancelled together on `stop()` (and on drop), so no orphaned
//! timer keeps mutating state after the consumer stops observing it.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use chrono::Utc;
use metrics::{counter, gauge};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::feed::client::FetchClient;
use crate::feed::error::FeedError;
use crate::feed::kinds::FeedKind;
use crate::feed::rotation::RotationCursor;
use crate::feed::types::{FeedRecord, FeedState, FeedStatus};

/// Rotation cadence for the "current record" cursor. Fixed by design,
/// independent of the per-feed refresh interval.
pub const ROTATION_INTERVAL_MS: u64 = 30_000;

/// State and cursor live under one lock so per-feed transitions stay
/// totally ordered and the cursor can never observe a half-published
/// record list.
struct Shared {
    state: FeedState,
    cursor: RotationCursor,
}

struct Inner {
    kind: Box<dyn FeedKind>,
    client: Box<dyn FetchClient>,
    cfg: DashboardConfig,
    shared: Mutex<Shared>,
    rng: Mutex<Box<dyn RngCore + Send>>,
    in_flight: AtomicBool,
}

impl Inner {
    fn advance(&self) {
        let mut sh = self.shared.lock().expect("feed state mutex poisoned");
        sh.cursor.next();
    }

    fn retreat(&self) {
        let mut sh = self.shared.lock().expect("feed state mutex poisoned");
        sh.cursor.previous();
    }
}

pub struct FeedController {
    inner: Arc<Inner>,
    refresh_task: Option<JoinHandle<()>>,
    rotation_task: Option<JoinHandle<()>>,
}

impl FeedController {
    pub fn new(
        kind: Box<dyn FeedKind>,
        client: Box<dyn FetchClient>,
        cfg: DashboardConfig,
    ) -> Self {
        Self::with_rng(kind, client, cfg, StdRng::from_os_rng())
    }

    /// Construct with an injected random source so tests can seed the
    /// fallback generator deterministically.
    pub fn with_rng(
        kind: Box<dyn FeedKind>,
        client: Box<dyn FetchClient>,
        cfg: DashboardConfig,
        rng: impl RngCore + Send + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                kind,
                client,
                cfg,
                shared: Mutex::new(Shared {
                    state: FeedState::new(),
                    cursor: RotationCursor::new(0),
                }),
                rng: Mutex::new(Box::new(rng)),
                in_flight: AtomicBool::new(false),
            }),
            refresh_task: None,
            rotation_task: None,
        }
    }

    /// Transition `Idle → Loading`, run an immediate fetch cycle, then
    /// keep refreshing at the configured cadence while rotating the
    /// current record on the fixed rotation cadence. Calling `start`
    /// again on a running controller is a no-op.
    pub fn start(&mut self) {
        if self.refresh_task.is_some() {
            return;
        }
        crate::feed::ensure_metrics_described();

        {
            let mut sh = self.inner.shared.lock().expect("feed state mutex poisoned");
            sh.state.status = FeedStatus::Loading;
        }

        let refresh_ms = self.inner.kind.refresh_interval_ms(&self.inner.cfg).max(1);
        let inner = Arc::clone(&self.inner);
        self.refresh_task = Some(tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(std::time::Duration::from_millis(refresh_ms));
            loop {
                // First tick fires immediately, giving the initial fetch.
                ticker.tick().await;
                run_cycle(&inner).await;
            }
        }));

        let inner = Arc::clone(&self.inner);
        self.rotation_task = Some(tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(std::time::Duration::from_millis(ROTATION_INTERVAL_MS));
            // Consume the immediate tick; rotation starts one interval in.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                inner.advance();
            }
        }));
    }

    /// Cancel the refresh and rotation timers together. Terminal for
    /// this controller instance.
    pub fn stop(&mut self) {
        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
        if let Some(task) = self.rotation_task.take() {
            task.abort();
        }
    }

    /// User-triggered refresh; suppressed like any other cycle while a
    /// fetch is already in flight.
    pub async fn refresh_now(&self) {
        run_cycle(&self.inner).await;
    }

    pub fn snapshot(&self) -> FeedState {
        self.inner
            .shared
            .lock()
            .expect("feed state mutex poisoned")
            .state
            .clone()
    }

    /// The record the rotation cursor currently points at.
    pub fn current_record(&self) -> Option<FeedRecord> {
        let sh = self.inner.shared.lock().expect("feed state mutex poisoned");
        sh.state.records.get(sh.cursor.index()).cloned()
    }

    /// `(index, length)` of the rotation cursor.
    pub fn cursor_position(&self) -> (usize, usize) {
        let sh = self.inner.shared.lock().expect("feed state mutex poisoned");
        (sh.cursor.index(), sh.cursor.length())
    }

    /// User navigation forward; same mutation path as the rotation timer.
    pub fn advance(&self) {
        self.inner.advance();
    }

    /// User navigation backward.
    pub fn retreat(&self) {
        self.inner.retreat();
    }
}

impl Drop for FeedController {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One fetch cycle: fetch, normalize, publish live records or degrade to
/// fallback. The in-flight guard keeps cycles from overlapping; the next
/// state transition is committed before the guard clears.
async fn run_cycle(inner: &Inner) {
    if inner.in_flight.swap(true, Ordering::SeqCst) {
        counter!("feed_refresh_skipped_total").increment(1);
        debug!(
            feed = inner.kind.name(),
            "refresh tick skipped, cycle already in flight"
        );
        return;
    }

    {
        let mut sh = inner.shared.lock().expect("feed state mutex poisoned");
        sh.state.status = FeedStatus::Loading;
    }

    let now = Utc::now();
    let endpoint = inner.kind.endpoint(&inner.cfg);
    let mut params = vec![("api_key".to_string(), inner.cfg.api_key.clone())];
    params.extend(inner.kind.query_params(now));

    match inner.client.fetch_json(&endpoint, &params).await {
        Ok(raw) => {
            let records = inner.kind.normalize(&inner.cfg, &raw);
            if records.is_empty() {
                // Decoded fine but nothing usable; empty is not success.
                degrade(inner, FeedError::EmptyResult);
            } else {
                publish_live(inner, records);
            }
        }
        Err(err) => degrade(inner, err),
    }

    inner.in_flight.store(false, Ordering::SeqCst);
}

fn publish_live(inner: &Inner, records: Vec<FeedRecord>) {
    let now = Utc::now();
    let count = records.len();

    let mut sh = inner.shared.lock().expect("feed state mutex poisoned");
    sh.cursor.reset(count);
    sh.state.records = records;
    sh.state.status = FeedStatus::Ready;
    sh.state.error = None;
    sh.state.last_updated = Some(now);
    drop(sh);

    counter!("feed_refresh_total").increment(1);
    gauge!("feed_last_publish_ts").set(now.timestamp() as f64);
    info!(
        feed = inner.kind.name(),
        records = count,
        "feed refreshed with live data"
    );
}

fn degrade(inner: &Inner, err: FeedError) {
    let now = Utc::now();
    warn!(
        feed = inner.kind.name(),
        error = %err,
        "feed fetch failed, switching to fallback data"
    );

    let records = {
        let mut rng = inner.rng.lock().expect("fallback rng mutex poisoned");
        inner.kind.fallback(&inner.cfg, now, rng.as_mut())
    };
    let count = records.len();

    let mut sh = inner.shared.lock().expect("feed state mutex poisoned");
    sh.cursor.reset(count);
    sh.state.records = records;
    sh.state.status = FeedStatus::Degraded;
    sh.state.error = Some(err.kind());
    sh.state.last_updated = Some(now);
    drop(sh);

    counter!("feed_fallback_total").increment(1);
    gauge!("feed_last_publish_ts").set(now.timestamp() as f64);
}
