//! # Event Catalog Engine
//! Pure filter/sort over the static astronomical-events catalog, plus
//! the time-bucket classifier used for the "time until" display. No
//! state; identical inputs always yield identical output.

pub mod seed;

pub use seed::default_catalog;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Meteor,
    Eclipse,
    Conjunction,
    Opposition,
    Transit,
    Occultation,
}

/// Immutable catalog entry, created once at session start and only read
/// afterwards. `metadata` carries display-only fields (ZHR, radiant,
/// magnitudes, viewing notes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCatalogEntry {
    pub id: u32,
    pub event_type: EventType,
    pub name: String,
    pub category: String,
    pub occurs_at: DateTime<Utc>,
    pub sub_type: Option<String>,
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(EventType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Upcoming,
    Past,
    All,
}

/// Ephemeral filter derived from user interaction; never persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterCriteria {
    pub event_type: TypeFilter,
    pub period: Period,
}

/// Filter and sort the catalog against `now`.
///
/// `Upcoming` keeps entries with `occurs_at >= now`, soonest first;
/// `Past` keeps the rest, most recent first; `All` keeps everything,
/// sorted ascending like the upcoming view.
pub fn filter(
    catalog: &[EventCatalogEntry],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<EventCatalogEntry> {
    let mut out: Vec<EventCatalogEntry> = catalog
        .iter()
        .filter(|e| match criteria.event_type {
            TypeFilter::All => true,
            TypeFilter::Only(t) => e.event_type == t,
        })
        .filter(|e| {
            let is_past = e.occurs_at < now;
            match criteria.period {
                Period::Upcoming => !is_past,
                Period::Past => is_past,
                Period::All => true,
            }
        })
        .cloned()
        .collect();

    match criteria.period {
        Period::Past => out.sort_by(|a, b| b.occurs_at.cmp(&a.occurs_at)),
        Period::Upcoming | Period::All => out.sort_by(|a, b| a.occurs_at.cmp(&b.occurs_at)),
    }
    out
}

/// Classify the distance from `now` to `occurs_at` into a human bucket.
/// Day difference truncates toward zero, so anything later today is
/// still "today".
pub fn time_until(occurs_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let d = (occurs_at - now).num_days();
    if d < 0 {
        "past".to_string()
    } else if d == 0 {
        "today".to_string()
    } else if d == 1 {
        "tomorrow".to_string()
    } else if d < 30 {
        format!("{d} days")
    } else if d < 365 {
        format!("{} months", d / 30)
    } else {
        format!("{} years", d / 365)
    }
}
