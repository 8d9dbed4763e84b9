// src/feed/kinds/donki.rs
// DONKI solar-flare feed (space-weather notifications).

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use rand::{Rng, RngCore};
use serde_json::{json, Map, Value};

use crate::config::DashboardConfig;
use crate::feed::kinds::FeedKind;
use crate::feed::types::{FeedRecord, SourceKind};

/// Flares are fetched for the trailing window ending at `now`.
const FLARE_WINDOW_DAYS: i64 = 30;

/// Classes used when synthesizing fallback flares.
const FALLBACK_CLASSES: [&str; 5] = ["C1.5", "C3.2", "M1.1", "M2.8", "X1.2"];

/// Monotonic intensity scale from the flare class letter. First matching
/// letter wins in the order X, M, C, B; anything else scores 1.
pub fn flare_intensity(class_type: &str) -> u32 {
    let t = class_type.to_ascii_uppercase();
    if t.contains('X') {
        10
    } else if t.contains('M') {
        5
    } else if t.contains('C') {
        2
    } else {
        1
    }
}

/// Display color keyed off the same classification.
pub fn flare_color(class_type: &str) -> &'static str {
    let t = class_type.to_ascii_uppercase();
    if t.contains('X') {
        "#EF4444" // extreme
    } else if t.contains('M') {
        "#F97316" // major
    } else if t.contains('C') {
        "#EAB308" // moderate
    } else {
        "#8B5CF6" // minor
    }
}

pub struct DonkiFeed;

impl FeedKind for DonkiFeed {
    fn name(&self) -> &'static str {
        "donki"
    }

    fn endpoint(&self, cfg: &DashboardConfig) -> String {
        cfg.endpoints.solar_flares.clone()
    }

    fn query_params(&self, now: DateTime<Utc>) -> Vec<(String, String)> {
        let start = now - Duration::days(FLARE_WINDOW_DAYS);
        vec![
            ("startDate".to_string(), start.format("%Y-%m-%d").to_string()),
            ("endDate".to_string(), now.format("%Y-%m-%d").to_string()),
        ]
    }

    fn refresh_interval_ms(&self, cfg: &DashboardConfig) -> u64 {
        cfg.refresh.solar_ms
    }

    fn normalize(&self, _cfg: &DashboardConfig, raw: &Value) -> Vec<FeedRecord> {
        let Some(items) = raw.as_array() else {
            return Vec::new();
        };
        let mut records: Vec<FeedRecord> =
            items.iter().filter_map(record_from_flare).collect();
        // Chronological, oldest first; consumers slice for display.
        records.sort_by_key(|r| r.timestamp);
        records
    }

    fn fallback(
        &self,
        _cfg: &DashboardConfig,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Vec<FeedRecord> {
        let mut records = Vec::new();
        let mut seq = 0u32;
        for back in (0..FLARE_WINDOW_DAYS).rev() {
            let day = now - Duration::days(back);
            let count = rng.random_range(1..=8);
            for _ in 0..count {
                let class_type = FALLBACK_CLASSES[rng.random_range(0..FALLBACK_CLASSES.len())];
                let begin = day
                    .with_hour(rng.random_range(0..24))
                    .and_then(|d| d.with_minute(rng.random_range(0..60)))
                    .unwrap_or(day);
                let peak = begin + Duration::minutes(30);
                let location =
                    format!("N{}E{}", rng.random_range(0..30), rng.random_range(0..60));
                records.push(make_record(
                    &format!("fallback-flr-{seq:03}"),
                    class_type,
                    begin,
                    Some(peak),
                    Some(&location),
                    SourceKind::Fallback,
                ));
                seq += 1;
            }
        }
        records.sort_by_key(|r| r.timestamp);
        records
    }
}

fn record_from_flare(item: &Value) -> Option<FeedRecord> {
    let begin_raw = item.get("beginTime")?.as_str()?;
    let begin = parse_flare_time(begin_raw)?;
    let class_type = item
        .get("classType")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let peak = item
        .get("peakTime")
        .and_then(Value::as_str)
        .and_then(parse_flare_time);
    let location = item.get("sourceLocation").and_then(Value::as_str);
    let id = match item.get("flrID").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => format!("{}-{}", begin_raw, class_type),
    };

    Some(make_record(
        &id,
        class_type,
        begin,
        peak,
        location,
        SourceKind::Live,
    ))
}

fn make_record(
    id: &str,
    class_type: &str,
    begin: DateTime<Utc>,
    peak: Option<DateTime<Utc>>,
    location: Option<&str>,
    source_kind: SourceKind,
) -> FeedRecord {
    let mut payload = Map::new();
    payload.insert("class_type".into(), json!(class_type));
    payload.insert("begin_time".into(), json!(begin));
    payload.insert("peak_time".into(), json!(peak));
    payload.insert("source_location".into(), json!(location));

    let mut derived = Map::new();
    derived.insert("intensity".into(), json!(flare_intensity(class_type)));
    derived.insert("color".into(), json!(flare_color(class_type)));

    FeedRecord {
        id: id.to_string(),
        timestamp: begin,
        source_kind,
        payload,
        derived,
    }
}

/// DONKI timestamps come as `"2016-01-01T23:00Z"` (no seconds); accept
/// full RFC 3339 as a fallback.
fn parse_flare_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%MZ") {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Endpoints, RefreshRates};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cfg() -> DashboardConfig {
        DashboardConfig {
            api_key: "DEMO_KEY".to_string(),
            endpoints: Endpoints {
                epic: "https://api.nasa.gov/EPIC/api/natural".to_string(),
                epic_archive: "https://api.nasa.gov/EPIC/archive/natural".to_string(),
                solar_flares: "https://api.nasa.gov/DONKI/FLR".to_string(),
            },
            refresh: RefreshRates::default(),
        }
    }

    #[test]
    fn intensity_scale_is_monotonic_in_class_order() {
        assert_eq!(flare_intensity("X1.2"), 10);
        assert_eq!(flare_intensity("m2.8"), 5);
        assert_eq!(flare_intensity("C3.2"), 2);
        assert_eq!(flare_intensity("B9.9"), 1);
        assert_eq!(flare_intensity(""), 1);
        assert_eq!(flare_intensity("A5"), 1);
        // First match wins in the order X, M, C, B.
        assert_eq!(flare_intensity("XM"), 10);
        assert_eq!(flare_intensity("MC"), 5);
    }

    #[test]
    fn color_tracks_classification() {
        assert_eq!(flare_color("X2"), "#EF4444");
        assert_eq!(flare_color("M1.1"), "#F97316");
        assert_eq!(flare_color("c3"), "#EAB308");
        assert_eq!(flare_color("B1"), "#8B5CF6");
        assert_eq!(flare_color(""), "#8B5CF6");
    }

    #[test]
    fn donki_timestamp_format_parses() {
        let dt = parse_flare_time("2016-01-01T23:00Z").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2016-01-01 23:00");
        assert!(parse_flare_time("2016-01-01T23:00:00Z").is_some());
        assert!(parse_flare_time("not a date").is_none());
    }

    #[test]
    fn normalize_sorts_ascending_and_skips_unparseable() {
        let c = cfg();
        let raw = json!([
            { "flrID": "b", "classType": "M1.0", "beginTime": "2024-03-02T10:00Z" },
            { "flrID": "a", "classType": "C5.0", "beginTime": "2024-03-01T08:30Z",
              "peakTime": "2024-03-01T09:00Z", "sourceLocation": "N11E22" },
            { "flrID": "broken", "classType": "X1.0", "beginTime": "???" },
            { "classType": "X1.0" }
        ]);
        let records = DonkiFeed.normalize(&c, &raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[1].id, "b");
        assert_eq!(records[0].derived["intensity"], json!(2));
        assert_eq!(records[0].payload["source_location"], json!("N11E22"));
    }

    #[test]
    fn fallback_is_internally_consistent() {
        let c = cfg();
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(42);
        let records = DonkiFeed.fallback(&c, now, &mut rng);

        // 1..=8 flares per day over the 30-day window.
        assert!(records.len() >= FLARE_WINDOW_DAYS as usize);
        assert!(records.len() <= 8 * FLARE_WINDOW_DAYS as usize);
        for r in &records {
            assert_eq!(r.source_kind, SourceKind::Fallback);
            let begin: DateTime<Utc> =
                serde_json::from_value(r.payload["begin_time"].clone()).unwrap();
            let peak: DateTime<Utc> =
                serde_json::from_value(r.payload["peak_time"].clone()).unwrap();
            assert!(peak > begin, "peak must come after begin");
            let class = r.payload["class_type"].as_str().unwrap();
            assert!(FALLBACK_CLASSES.contains(&class));
        }
        // Chronological like normalized output.
        assert!(records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn fallback_is_deterministic_under_a_seeded_rng() {
        let c = cfg();
        let now = Utc::now();
        let a = DonkiFeed.fallback(&c, now, &mut StdRng::seed_from_u64(7));
        let b = DonkiFeed.fallback(&c, now, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn query_params_cover_the_trailing_window() {
        let now = parse_flare_time("2024-03-31T12:00Z").unwrap();
        let params = DonkiFeed.query_params(now);
        assert_eq!(
            params,
            vec![
                ("startDate".to_string(), "2024-03-01".to_string()),
                ("endDate".to_string(), "2024-03-31".to_string()),
            ]
        );
    }
}
