// src/feed/kinds/epic.rs
// EPIC whole-Earth imagery feed (DSCOVR satellite).

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Utc};
use rand::RngCore;
use serde_json::{json, Map, Value};

use crate::config::DashboardConfig;
use crate::feed::kinds::FeedKind;
use crate::feed::types::{FeedRecord, SourceKind};

/// At most this many images are kept per refresh.
const MAX_IMAGES: usize = 10;

pub struct EpicFeed;

impl FeedKind for EpicFeed {
    fn name(&self) -> &'static str {
        "epic"
    }

    fn endpoint(&self, cfg: &DashboardConfig) -> String {
        format!("{}/images", cfg.endpoints.epic)
    }

    fn query_params(&self, _now: DateTime<Utc>) -> Vec<(String, String)> {
        Vec::new()
    }

    fn refresh_interval_ms(&self, cfg: &DashboardConfig) -> u64 {
        cfg.refresh.imagery_ms
    }

    fn normalize(&self, cfg: &DashboardConfig, raw: &Value) -> Vec<FeedRecord> {
        let Some(items) = raw.as_array() else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| record_from_item(cfg, item))
            .take(MAX_IMAGES)
            .collect()
    }

    fn fallback(
        &self,
        _cfg: &DashboardConfig,
        now: DateTime<Utc>,
        _rng: &mut dyn RngCore,
    ) -> Vec<FeedRecord> {
        // Two known-good archive images stand in for the live gallery.
        vec![
            make_record(
                "epic_earth_001",
                now,
                "Earth from DSCOVR satellite",
                "https://epic.gsfc.nasa.gov/epic-galleries/2023/lunar_transit/thumbs/epic_1b_20230222173135.jpg",
                0.0,
                0.0,
                SourceKind::Fallback,
            ),
            make_record(
                "epic_earth_002",
                now - Duration::hours(1),
                "Pacific Ocean view from space",
                "https://epic.gsfc.nasa.gov/epic-galleries/2023/eclipse/thumbs/epic_1b_20231014153201.jpg",
                15.0,
                -120.0,
                SourceKind::Fallback,
            ),
        ]
    }
}

fn record_from_item(cfg: &DashboardConfig, item: &Value) -> Option<FeedRecord> {
    let image = item.get("image")?.as_str()?;
    let date_raw = item.get("date")?.as_str()?;
    let timestamp = parse_epic_time(date_raw)?;
    let caption = item
        .get("caption")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let (lat, lon) = display_coordinates(item);
    let image_url = archive_image_url(cfg, timestamp, image);

    Some(make_record(
        image,
        timestamp,
        caption,
        &image_url,
        lat,
        lon,
        SourceKind::Live,
    ))
}

fn make_record(
    image: &str,
    timestamp: DateTime<Utc>,
    caption: &str,
    image_url: &str,
    lat: f64,
    lon: f64,
    source_kind: SourceKind,
) -> FeedRecord {
    let mut payload = Map::new();
    payload.insert("image".into(), json!(image));
    payload.insert("caption".into(), json!(caption));
    payload.insert("image_url".into(), json!(image_url));
    payload.insert("lat".into(), json!(lat));
    payload.insert("lon".into(), json!(lon));

    let mut derived = Map::new();
    derived.insert(
        "display_time".into(),
        json!(timestamp.format("%Y-%m-%d %H:%M UTC").to_string()),
    );

    FeedRecord {
        id: image.to_string(),
        timestamp,
        source_kind,
        payload,
        derived,
    }
}

/// Display coordinates: the explicit centroid when present, else the
/// DSCOVR J2000 positional vector (`y` → lat, `x` → lon), components
/// defaulting to zero.
fn display_coordinates(item: &Value) -> (f64, f64) {
    if let Some(c) = item.get("centroid_coordinates").filter(|c| c.is_object()) {
        return (field_f64(c, "lat"), field_f64(c, "lon"));
    }
    if let Some(p) = item.get("dscovr_j2000_position").filter(|p| p.is_object()) {
        return (field_f64(p, "y"), field_f64(p, "x"));
    }
    (0.0, 0.0)
}

fn field_f64(obj: &Value, key: &str) -> f64 {
    obj.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Secondary image-resource URL, built from the metadata item's own date
/// components and image identifier.
fn archive_image_url(cfg: &DashboardConfig, ts: DateTime<Utc>, image: &str) -> String {
    format!(
        "{}/{:04}/{:02}/{:02}/png/{}.png?api_key={}",
        cfg.endpoints.epic_archive,
        ts.year(),
        ts.month(),
        ts.day(),
        image,
        cfg.api_key
    )
}

/// EPIC metadata dates come as `"2015-10-31 00:45:07"`; accept RFC 3339
/// as a fallback.
fn parse_epic_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
