//! Property-based tests for the search pipeline.
//!
//! Random datasets are built straight into a `DatabaseBuilder`; queries are
//! then checked against invariants that must hold for any input.
//!
//! Run with: `cargo test -p neo-query --test search_properties`

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use neo_core::OrbitPath;
use neo_io::{Database, DatabaseBuilder, NeoAttributes};
use neo_query::{dedup_stable, search, take_limit, QueryConfig, SearchResults};

// =============================================================================
// Strategies
// =============================================================================

/// (object index, day offset, distance). Attributes derive from the index so
/// repeated names always agree.
fn rows_strategy() -> impl Strategy<Value = Vec<(u8, u8, u32)>> {
    prop::collection::vec((0u8..8, 0u8..10, 0u32..100_000), 1..40)
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn day(offset: u8) -> NaiveDate {
    base_date() + Days::new(offset as u64)
}

fn build(rows: &[(u8, u8, u32)]) -> Database {
    let mut b = DatabaseBuilder::new();
    for &(neo, offset, distance) in rows {
        b.record_orbit(
            OrbitPath::new(format!("neo-{neo}"), day(offset), distance as f64),
            NeoAttributes {
                id: Some(neo.to_string()),
                diameter_min_km: Some(neo as f64 * 0.25),
                is_potentially_hazardous: Some(neo % 2 == 0),
            },
        )
        .unwrap();
    }
    b.build()
}

fn range(start: u8, end: u8) -> QueryConfig {
    QueryConfig {
        start_date: Some(day(start).to_string()),
        end_date: Some(day(end).to_string()),
        number: Some(1000),
        ..Default::default()
    }
}

fn neo_names(results: &SearchResults<'_>) -> Vec<String> {
    match results {
        SearchResults::Neos(v) => v.iter().map(|n| n.name.clone()).collect(),
        SearchResults::Paths(_) => panic!("expected objects"),
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// One instance per name, holding every approach recorded for it.
    #[test]
    fn prop_one_object_per_name(rows in rows_strategy()) {
        let db = build(&rows);
        for neo in db.neos() {
            let expected = rows
                .iter()
                .filter(|(n, _, _)| format!("neo-{n}") == neo.name)
                .count();
            prop_assert_eq!(neo.orbits.len(), expected);
        }
        prop_assert_eq!(db.orbit_count(), rows.len());
    }

    /// Every object from an exact-date query has an approach on that date.
    #[test]
    fn prop_exact_date_matches(rows in rows_strategy(), offset in 0u8..10) {
        let db = build(&rows);
        let config = QueryConfig {
            date: Some(day(offset).to_string()),
            number: Some(1000),
            ..Default::default()
        };
        let results = search(&db, &config).unwrap();
        let expected = rows.iter().any(|(_, o, _)| *o == offset);
        prop_assert_eq!(!results.is_empty(), expected);
        if let SearchResults::Neos(neos) = results {
            for neo in neos {
                prop_assert!(neo.orbit_dates().any(|d| d == day(offset)));
            }
        }
    }

    /// `diameter:>=:0` never removes anything.
    #[test]
    fn prop_non_negative_diameter_filter_is_a_no_op(
        rows in rows_strategy(),
        start in 0u8..10,
        end in 0u8..10,
    ) {
        let db = build(&rows);
        let plain = search(&db, &range(start, end)).unwrap();
        let mut filtered = range(start, end);
        filtered.filter = vec!["diameter:>=:0".into()];
        prop_assert_eq!(search(&db, &filtered).unwrap(), plain);
    }

    /// Results never exceed the cap, and a smaller cap yields a prefix.
    #[test]
    fn prop_limit_is_a_prefix(rows in rows_strategy(), limit in 0i64..12) {
        let db = build(&rows);
        let full = neo_names(&search(&db, &range(0, 9)).unwrap());
        let mut capped = range(0, 9);
        capped.number = Some(limit);
        let capped = neo_names(&search(&db, &capped).unwrap());
        prop_assert!(capped.len() <= limit as usize);
        prop_assert_eq!(&full[..capped.len()], &capped[..]);
    }

    /// Approach results never repeat.
    #[test]
    fn prop_paths_are_unique(rows in rows_strategy()) {
        let db = build(&rows);
        let mut config = range(0, 9);
        config.return_object = Some("Path".into());
        if let SearchResults::Paths(paths) = search(&db, &config).unwrap() {
            let again = dedup_stable(paths.clone());
            prop_assert_eq!(again, paths);
        } else {
            prop_assert!(false, "expected paths");
        }
    }

    /// De-duplication is idempotent.
    #[test]
    fn prop_dedup_idempotent(items in prop::collection::vec(0u8..16, 0..64)) {
        let once = dedup_stable(items);
        prop_assert_eq!(dedup_stable(once.clone()), once);
    }

    #[test]
    fn prop_take_limit_bounds(items in prop::collection::vec(any::<u8>(), 0..32), limit in 0usize..40) {
        let n = items.len();
        prop_assert_eq!(take_limit(items, limit).len(), n.min(limit));
    }
}
