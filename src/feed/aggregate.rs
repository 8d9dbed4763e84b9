//! # Daily Aggregates
//! Groups solar-flare records by UTC calendar day for the activity
//! chart. Days without records are absent, not zero-filled.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::feed::types::FeedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyAggregate {
    pub day: NaiveDate,
    pub count: u32,
    /// `round(sum(intensity) / count)`.
    pub avg_intensity: u32,
    pub max_intensity: u32,
}

/// Reduce records into one aggregate per distinct day, sorted ascending.
/// Works identically for live and fallback records since both carry a
/// derived `intensity`.
pub fn daily_aggregates(records: &[FeedRecord]) -> Vec<DailyAggregate> {
    let mut groups: BTreeMap<NaiveDate, (u32, u64, u32)> = BTreeMap::new();

    for r in records {
        let intensity = r
            .derived
            .get("intensity")
            .and_then(Value::as_u64)
            .unwrap_or(1) as u32;
        let entry = groups.entry(r.timestamp.date_naive()).or_insert((0, 0, 0));
        entry.0 += 1;
        entry.1 += u64::from(intensity);
        entry.2 = entry.2.max(intensity);
    }

    groups
        .into_iter()
        .map(|(day, (count, sum, max))| DailyAggregate {
            day,
            count,
            avg_intensity: (sum as f64 / count as f64).round() as u32,
            max_intensity: max,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::SourceKind;
    use chrono::{DateTime, Utc};
    use serde_json::{json, Map};

    fn flare(ts: &str, intensity: u32) -> FeedRecord {
        let timestamp: DateTime<Utc> = ts.parse().expect("test timestamp");
        let mut derived = Map::new();
        derived.insert("intensity".into(), json!(intensity));
        FeedRecord {
            id: format!("{ts}-{intensity}"),
            timestamp,
            source_kind: SourceKind::Live,
            payload: Map::new(),
            derived,
        }
    }

    #[test]
    fn same_day_records_reduce_to_one_aggregate() {
        let records = vec![
            flare("2024-03-01T08:30:00Z", 5),
            flare("2024-03-01T22:10:00Z", 2),
        ];
        let aggs = daily_aggregates(&records);
        assert_eq!(aggs.len(), 1);
        assert_eq!(aggs[0].count, 2);
        assert_eq!(aggs[0].max_intensity, 5);
        // (5 + 2) / 2 = 3.5 rounds to 4.
        assert_eq!(aggs[0].avg_intensity, 4);
    }

    #[test]
    fn days_without_records_are_absent() {
        let records = vec![
            flare("2024-03-01T08:30:00Z", 2),
            flare("2024-03-05T01:00:00Z", 10),
        ];
        let aggs = daily_aggregates(&records);
        assert_eq!(aggs.len(), 2);
        assert_eq!(
            aggs[0].day,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            aggs[1].day,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
    }

    #[test]
    fn grouping_uses_the_utc_date_component() {
        // 23:30 UTC and 00:30 UTC the next day are different buckets.
        let records = vec![
            flare("2024-03-01T23:30:00Z", 2),
            flare("2024-03-02T00:30:00Z", 2),
        ];
        assert_eq!(daily_aggregates(&records).len(), 2);
    }

    #[test]
    fn empty_input_yields_no_aggregates() {
        assert!(daily_aggregates(&[]).is_empty());
    }
}
