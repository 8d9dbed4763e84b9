// tests/catalog_filter.rs
//
// Filtering the seeded catalog through the public API. Assertions are
// property-based against `now` so they hold on any calendar date.

use astro_feed_engine::catalog::{
    self, default_catalog, EventType, FilterCriteria, Period, TypeFilter,
};
use chrono::Utc;

#[test]
fn upcoming_meteors_only_and_soonest_first() {
    let now = Utc::now();
    let cat = default_catalog(now);
    let criteria = FilterCriteria {
        event_type: TypeFilter::Only(EventType::Meteor),
        period: Period::Upcoming,
    };
    let out = catalog::filter(&cat, &criteria, now);

    assert!(!out.is_empty());
    assert!(out.iter().all(|e| e.event_type == EventType::Meteor));
    assert!(out.iter().all(|e| e.occurs_at >= now));
    assert!(out.windows(2).all(|w| w[0].occurs_at <= w[1].occurs_at));
}

#[test]
fn past_entries_are_most_recent_first() {
    let now = Utc::now();
    let cat = default_catalog(now);
    let criteria = FilterCriteria {
        event_type: TypeFilter::All,
        period: Period::Past,
    };
    let out = catalog::filter(&cat, &criteria, now);

    assert!(out.iter().all(|e| e.occurs_at < now));
    assert!(out.windows(2).all(|w| w[0].occurs_at >= w[1].occurs_at));
}

#[test]
fn all_period_partitions_exactly() {
    let now = Utc::now();
    let cat = default_catalog(now);

    let count = |period| {
        catalog::filter(
            &cat,
            &FilterCriteria {
                event_type: TypeFilter::All,
                period,
            },
            now,
        )
        .len()
    };

    assert_eq!(count(Period::All), cat.len());
    assert_eq!(count(Period::Upcoming) + count(Period::Past), cat.len());
}

#[test]
fn filtering_is_idempotent_for_a_fixed_now() {
    let now = Utc::now();
    let cat = default_catalog(now);
    let criteria = FilterCriteria {
        event_type: TypeFilter::Only(EventType::Eclipse),
        period: Period::All,
    };
    let a = catalog::filter(&cat, &criteria, now);
    let b = catalog::filter(&cat, &criteria, now);
    assert_eq!(a, b);
    // And the catalog itself was not mutated by filtering.
    assert_eq!(cat, default_catalog(now));
}

#[test]
fn every_upcoming_entry_gets_a_forward_looking_bucket() {
    let now = Utc::now();
    let cat = default_catalog(now);
    let upcoming = catalog::filter(
        &cat,
        &FilterCriteria {
            event_type: TypeFilter::All,
            period: Period::Upcoming,
        },
        now,
    );
    for e in upcoming {
        let bucket = catalog::time_until(e.occurs_at, now);
        assert_ne!(bucket, "past", "{} classified as past", e.name);
    }
}
