//! # Search Executor
//!
//! Runs a [`QuerySpec`] against a [`Database`]. Execution is read-only and
//! cannot fail; every stage narrows or reshapes the previous one.
//!
//! 1. Select objects by approach date (repeats allowed).
//! 2. Apply object filters (`hazardous`, `diameter`) in input order.
//! 3. Expand surviving objects to *all* of their approaches.
//! 4. Apply approach filters (`distance`) and map the survivors back to
//!    their owners by name. Without approach filters, steps 3 and 4 keep
//!    the objects from step 2 as they are.
//! 5. De-duplicate the requested list.
//! 6. Truncate to the limit.

use std::collections::HashSet;
use std::hash::Hash;
use std::time::Instant;

use serde::Serialize;

use neo_core::{NearEarthObject, OrbitPath};
use neo_io::Database;

use crate::filter::FilterGroups;
use crate::parser::{DateSearch, QuerySpec, ReturnObject};

/// Query output, borrowing from the database it was run against.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchResults<'db> {
    Neos(Vec<&'db NearEarthObject>),
    Paths(Vec<&'db OrbitPath>),
}

impl SearchResults<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Neos(v) => v.len(),
            Self::Paths(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn return_object(&self) -> ReturnObject {
        match self {
            Self::Neos(_) => ReturnObject::Neo,
            Self::Paths(_) => ReturnObject::Path,
        }
    }
}

/// Executes queries against a shared, frozen [`Database`].
#[derive(Clone, Copy)]
pub struct NeoSearcher<'db> {
    db: &'db Database,
}

impl<'db> NeoSearcher<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    pub fn get_objects(&self, query: &QuerySpec) -> SearchResults<'db> {
        let start = Instant::now();

        let mut neos = self.select_by_date(&query.date_search);
        let selected = neos.len();

        let groups = FilterGroups::of(&query.filters);
        for filter in &groups.neo {
            neos = filter.apply(neos);
        }

        let mut paths = expand_orbits(&neos);
        if !groups.path.is_empty() {
            for filter in &groups.path {
                paths = filter.apply(paths);
            }
            neos = paths
                .iter()
                .filter_map(|p| self.db.neo_by_name(&p.neo_name))
                .collect();
        }

        let results = match query.return_object {
            ReturnObject::Neo => SearchResults::Neos(take_limit(dedup_stable(neos), query.limit)),
            ReturnObject::Path => SearchResults::Paths(take_limit(dedup_stable(paths), query.limit)),
        };

        tracing::debug!(
            "Query selected {} candidates, returned {} {} in {:?}",
            selected,
            results.len(),
            query.return_object,
            start.elapsed()
        );

        results
    }

    fn select_by_date(&self, date_search: &DateSearch) -> Vec<&'db NearEarthObject> {
        match *date_search {
            DateSearch::Equals(date) => self.db.neos_on(date).collect(),
            DateSearch::Between { start, end } => self.db.neos_between(start, end).collect(),
        }
    }
}

fn expand_orbits<'db>(neos: &[&'db NearEarthObject]) -> Vec<&'db OrbitPath> {
    neos.iter().flat_map(|neo| neo.orbits.iter()).collect()
}

/// Drop repeated items, keeping each first occurrence in place.
pub fn dedup_stable<T: Copy + Eq + Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}

/// First `limit` items; everything when fewer are available.
pub fn take_limit<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    items.truncate(limit);
    items
}
