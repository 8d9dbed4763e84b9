// src/catalog/seed.rs
// Fixed astronomical-events catalog. Built once at session start;
// recurring yearly events are pinned relative to the current year.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde_json::{json, Map, Value};

use crate::catalog::{EventCatalogEntry, EventType};

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("static catalog date")
        .and_hms_opt(0, 0, 0)
        .expect("static catalog time")
        .and_utc()
}

fn meta(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(m) => m,
        _ => Map::new(),
    }
}

/// The fixed event list shown by the events panel: major meteor showers,
/// the next eclipses, bright conjunctions, and a handful of rarer events,
/// plus one recent past shower for comparison. Dates for recurring events
/// are computed from `now`'s year at initialization.
pub fn default_catalog(now: DateTime<Utc>) -> Vec<EventCatalogEntry> {
    let year = now.year();

    vec![
        // Meteor showers
        EventCatalogEntry {
            id: 1,
            event_type: EventType::Meteor,
            name: "Quadrantids".to_string(),
            category: "Major".to_string(),
            occurs_at: date(year + 1, 1, 4),
            sub_type: None,
            metadata: meta(json!({
                "duration_days": 7,
                "zhr": 120,
                "radiant": "Boötes",
                "best_viewing": "Pre-dawn hours",
                "moon_phase": "New Moon - Excellent conditions",
                "visibility": "Northern Hemisphere",
                "description": "The Quadrantids are known for their bright fireball meteors with short duration but high intensity.",
                "observing_tips": "Look northeast after midnight. Peak activity occurs over just a few hours."
            })),
        },
        EventCatalogEntry {
            id: 2,
            event_type: EventType::Meteor,
            name: "Perseids".to_string(),
            category: "Major".to_string(),
            occurs_at: date(year + 1, 8, 13),
            sub_type: None,
            metadata: meta(json!({
                "duration_days": 30,
                "zhr": 100,
                "radiant": "Perseus",
                "best_viewing": "Late evening to dawn",
                "moon_phase": "Waning Crescent - Good conditions",
                "visibility": "Northern Hemisphere",
                "description": "One of the most reliable and spectacular meteor showers, known for fast and bright meteors.",
                "observing_tips": "Best viewed from a dark location away from city lights. No telescope needed."
            })),
        },
        EventCatalogEntry {
            id: 3,
            event_type: EventType::Meteor,
            name: "Geminids".to_string(),
            category: "Major".to_string(),
            occurs_at: date(year, 12, 14),
            sub_type: None,
            metadata: meta(json!({
                "duration_days": 14,
                "zhr": 120,
                "radiant": "Gemini",
                "best_viewing": "All night",
                "moon_phase": "Full Moon - Poor conditions",
                "visibility": "Global",
                "description": "Often considered the best meteor shower of the year with multicolored meteors.",
                "observing_tips": "Look high in the sky around 2 AM. Meteors appear slower than other showers."
            })),
        },
        // Eclipses
        EventCatalogEntry {
            id: 4,
            event_type: EventType::Eclipse,
            name: "Total Solar Eclipse".to_string(),
            category: "Total".to_string(),
            occurs_at: date(year + 1, 8, 12),
            sub_type: Some("solar".to_string()),
            metadata: meta(json!({
                "duration_seconds": 378,
                "magnitude": 1.0386,
                "location": "Arctic, Europe, Asia",
                "path": "Greenland, Iceland, Spain, Russia, China",
                "visibility": "Total eclipse visible across Arctic and northern regions",
                "max_eclipse": "17:47 UTC",
                "saros": 146,
                "description": "A spectacular total solar eclipse crossing multiple continents.",
                "observing_tips": "Use proper eclipse glasses. Never look directly at the sun without protection."
            })),
        },
        EventCatalogEntry {
            id: 5,
            event_type: EventType::Eclipse,
            name: "Total Lunar Eclipse".to_string(),
            category: "Total".to_string(),
            occurs_at: date(year + 1, 3, 14),
            sub_type: Some("lunar".to_string()),
            metadata: meta(json!({
                "duration_minutes": 200,
                "magnitude": 1.178,
                "location": "Global",
                "path": "Pacific, Americas, Western Europe, Western Africa",
                "visibility": "Total lunar eclipse visible from Americas and western regions",
                "max_eclipse": "06:59 UTC",
                "saros": 129,
                "description": "A beautiful total lunar eclipse creating a 'Blood Moon' effect.",
                "observing_tips": "Safe to view with naked eye. Best observed during totality phase."
            })),
        },
        // Planetary conjunctions
        EventCatalogEntry {
            id: 6,
            event_type: EventType::Conjunction,
            name: "Venus-Jupiter Conjunction".to_string(),
            category: "Close".to_string(),
            occurs_at: date(year + 1, 5, 23),
            sub_type: None,
            metadata: meta(json!({
                "separation": "0.5°",
                "magnitude": "Venus: -4.0, Jupiter: -2.1",
                "visibility": "Evening sky",
                "direction": "Western horizon",
                "best_viewing": "30 minutes after sunset",
                "description": "A spectacular close conjunction of the two brightest planets.",
                "observing_tips": "Look west after sunset. They'll appear as a brilliant 'double star'."
            })),
        },
        EventCatalogEntry {
            id: 7,
            event_type: EventType::Conjunction,
            name: "Mars-Saturn Conjunction".to_string(),
            category: "Wide".to_string(),
            occurs_at: date(year + 1, 4, 10),
            sub_type: None,
            metadata: meta(json!({
                "separation": "2.1°",
                "magnitude": "Mars: 1.2, Saturn: 0.8",
                "visibility": "Pre-dawn sky",
                "direction": "Eastern horizon",
                "best_viewing": "1 hour before sunrise",
                "description": "An interesting pairing of the red planet and ringed world.",
                "observing_tips": "Use binoculars to see Saturn's rings while Mars appears as a red dot."
            })),
        },
        // Other events
        EventCatalogEntry {
            id: 8,
            event_type: EventType::Opposition,
            name: "Mars Opposition".to_string(),
            category: "Close".to_string(),
            occurs_at: date(year + 1, 1, 16),
            sub_type: None,
            metadata: meta(json!({
                "magnitude": "-1.4",
                "distance": "0.68 AU",
                "visibility": "All night",
                "best_viewing": "Midnight",
                "description": "Mars at its closest approach to Earth, appearing largest and brightest.",
                "observing_tips": "Perfect time for telescopic observation. Look for polar ice caps and surface features."
            })),
        },
        EventCatalogEntry {
            id: 9,
            event_type: EventType::Transit,
            name: "Mercury Transit".to_string(),
            category: "Rare".to_string(),
            occurs_at: date(year + 7, 11, 13),
            sub_type: None,
            metadata: meta(json!({
                "duration_minutes": 485,
                "visibility": "Americas, Europe, Africa, Asia",
                "description": "Mercury passes directly between Earth and the Sun.",
                "observing_tips": "Requires telescope with solar filter. Mercury appears as tiny black dot crossing Sun's disk."
            })),
        },
        EventCatalogEntry {
            id: 10,
            event_type: EventType::Occultation,
            name: "Moon Occults Venus".to_string(),
            category: "Bright".to_string(),
            occurs_at: date(year + 1, 7, 19),
            sub_type: None,
            metadata: meta(json!({
                "duration_minutes": 45,
                "visibility": "Asia, Australia",
                "magnitude": "Venus: -4.1",
                "description": "The Moon passes in front of Venus, temporarily hiding it from view.",
                "observing_tips": "Watch as Venus disappears behind Moon's dark limb and reappears on bright limb."
            })),
        },
        // A recent past shower, kept for the "recent past" view
        EventCatalogEntry {
            id: 11,
            event_type: EventType::Meteor,
            name: "Leonids".to_string(),
            category: "Variable".to_string(),
            occurs_at: date(year, 11, 17),
            sub_type: None,
            metadata: meta(json!({
                "duration_days": 21,
                "zhr": 15,
                "radiant": "Leo",
                "best_viewing": "Pre-dawn hours",
                "moon_phase": "Full Moon - Poor conditions",
                "visibility": "Global",
                "description": "Famous for occasional meteor storms, though currently in quiet period.",
                "observing_tips": "Best viewed after midnight when Leo constellation is high."
            })),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_unique_ids_and_recurring_dates_track_the_year() {
        let now = date(2026, 8, 7);
        let catalog = default_catalog(now);
        assert_eq!(catalog.len(), 11);

        let mut ids: Vec<u32> = catalog.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 11, "ids must be unique");

        let perseids = catalog.iter().find(|e| e.name == "Perseids").unwrap();
        assert_eq!(perseids.occurs_at.year(), 2027);
        let geminids = catalog.iter().find(|e| e.name == "Geminids").unwrap();
        assert_eq!(geminids.occurs_at.year(), 2026);
        let transit = catalog.iter().find(|e| e.name == "Mercury Transit").unwrap();
        assert_eq!(transit.occurs_at.year(), 2033);
    }

    #[test]
    fn eclipses_carry_sub_types() {
        let catalog = default_catalog(date(2026, 1, 1));
        let eclipses: Vec<_> = catalog
            .iter()
            .filter(|e| e.event_type == EventType::Eclipse)
            .collect();
        assert_eq!(eclipses.len(), 2);
        assert!(eclipses
            .iter()
            .all(|e| matches!(e.sub_type.as_deref(), Some("solar") | Some("lunar"))));
    }

    #[test]
    fn meteor_showers_carry_zhr_metadata() {
        let catalog = default_catalog(date(2026, 1, 1));
        for shower in catalog.iter().filter(|e| e.event_type == EventType::Meteor) {
            assert!(shower.metadata.get("zhr").is_some(), "{} lacks zhr", shower.name);
            assert!(shower.metadata.get("radiant").is_some());
        }
    }
}
