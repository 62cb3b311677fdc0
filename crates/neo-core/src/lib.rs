//! # neo-core — The Data Model of NEO Search
//!
//! Two kinds of record make up the dataset:
//!
//! - [`NearEarthObject`]: the observed body. One instance per distinct name,
//!   owning every close approach recorded for it.
//! - [`OrbitPath`]: a single close approach on one date at one miss distance.
//!   It refers back to its owner by name only.
//!
//! Equality is deliberately narrower than the struct layout on both types.
//! A `NearEarthObject` is its `id`; an `OrbitPath` is its
//! `(neo_name, close_approach_date, miss_distance_km)` triple.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::Serialize;

/// Calendar format of `close_approach_date` values, in data files and queries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// The two entity kinds a filter field can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    NearEarthObject,
    OrbitPath,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NearEarthObject => write!(f, "NearEarthObject"),
            Self::OrbitPath => write!(f, "OrbitPath"),
        }
    }
}

// =============================================================================
// NearEarthObject
// =============================================================================

/// A near-Earth object and every close approach recorded for it.
#[derive(Debug, Clone, Serialize)]
pub struct NearEarthObject {
    /// Opaque identifier from the source catalogue.
    pub id: String,

    /// Display name; the uniqueness key during ingestion.
    pub name: String,

    /// Lower bound of the estimated diameter, in kilometres.
    pub diameter_min_km: f64,

    pub is_potentially_hazardous: bool,

    /// Close approaches in ingestion order.
    pub orbits: Vec<OrbitPath>,
}

impl NearEarthObject {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        diameter_min_km: f64,
        is_potentially_hazardous: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            diameter_min_km,
            is_potentially_hazardous,
            orbits: Vec::new(),
        }
    }

    /// Append a close approach. Order of calls is preserved.
    #[inline]
    pub fn update_orbits(&mut self, orbit: OrbitPath) {
        self.orbits.push(orbit);
    }

    /// Dates of every recorded approach, in ingestion order.
    pub fn orbit_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.orbits.iter().map(|o| o.close_approach_date)
    }
}

// Identity lives in `id`. Two snapshots of the same object compare equal
// even if one has accumulated more orbits than the other.

impl PartialEq for NearEarthObject {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NearEarthObject {}

impl Hash for NearEarthObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dates: Vec<String> = self.orbit_dates().map(|d| d.to_string()).collect();
        write!(
            f,
            "name:{} orbit_dates:[{}] hazardous:{}",
            self.name,
            dates.join(", "),
            self.is_potentially_hazardous
        )
    }
}

// =============================================================================
// OrbitPath
// =============================================================================

/// A single close approach of a [`NearEarthObject`].
#[derive(Debug, Clone, Serialize)]
pub struct OrbitPath {
    /// Name of the owning object. A lookup key, not ownership.
    pub neo_name: String,

    pub close_approach_date: NaiveDate,

    /// Miss distance, in kilometres.
    pub miss_distance_km: f64,
}

impl OrbitPath {
    pub fn new(
        neo_name: impl Into<String>,
        close_approach_date: NaiveDate,
        miss_distance_km: f64,
    ) -> Self {
        Self {
            neo_name: neo_name.into(),
            close_approach_date,
            miss_distance_km,
        }
    }

    #[inline]
    fn key(&self) -> (&str, NaiveDate, u64) {
        (
            self.neo_name.as_str(),
            self.close_approach_date,
            self.miss_distance_km.to_bits(),
        )
    }
}

// Distance is compared by bit pattern so that Eq stays reflexive and agrees
// with Hash, NaN included.

impl PartialEq for OrbitPath {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OrbitPath {}

impl Hash for OrbitPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for OrbitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrbitPath neo:{} close_approach_date:{} miss_distance_km:{}",
            self.neo_name, self.close_approach_date, self.miss_distance_km
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_date_accepts_iso_and_trims() {
        assert_eq!(parse_date(" 2020-01-02 "), NaiveDate::from_ymd_opt(2020, 1, 2));
        assert_eq!(parse_date("2020-Jan-02"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_update_orbits_preserves_order() {
        let mut neo = NearEarthObject::new("1", "A1", 0.5, false);
        neo.update_orbits(OrbitPath::new("A1", date("2020-01-02"), 10.0));
        neo.update_orbits(OrbitPath::new("A1", date("2020-01-01"), 20.0));
        let dates: Vec<_> = neo.orbit_dates().collect();
        assert_eq!(dates, vec![date("2020-01-02"), date("2020-01-01")]);
    }

    #[test]
    fn test_neo_equality_is_identity_only() {
        let a = NearEarthObject::new("42", "A1", 0.5, false);
        let mut b = NearEarthObject::new("42", "renamed", 9.0, true);
        b.update_orbits(OrbitPath::new("renamed", date("2020-01-01"), 1.0));
        assert_eq!(a, b);
        assert_ne!(a, NearEarthObject::new("43", "A1", 0.5, false));
    }

    #[test]
    fn test_orbit_equality_covers_name_date_distance() {
        let a = OrbitPath::new("A1", date("2020-01-01"), 1000.0);
        assert_eq!(a, OrbitPath::new("A1", date("2020-01-01"), 1000.0));
        assert_ne!(a, OrbitPath::new("A2", date("2020-01-01"), 1000.0));
        assert_ne!(a, OrbitPath::new("A1", date("2020-01-02"), 1000.0));
        assert_ne!(a, OrbitPath::new("A1", date("2020-01-01"), 1000.5));
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let mut set = HashSet::new();
        set.insert(OrbitPath::new("A1", date("2020-01-01"), 1000.0));
        set.insert(OrbitPath::new("A1", date("2020-01-01"), 1000.0));
        set.insert(OrbitPath::new("A1", date("2020-01-01"), f64::NAN));
        set.insert(OrbitPath::new("A1", date("2020-01-01"), f64::NAN));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display_formats() {
        let mut neo = NearEarthObject::new("1", "A1", 0.5, true);
        neo.update_orbits(OrbitPath::new("A1", date("2020-01-01"), 1000.0));
        assert_eq!(neo.to_string(), "name:A1 orbit_dates:[2020-01-01] hazardous:true");
        assert_eq!(
            neo.orbits[0].to_string(),
            "OrbitPath neo:A1 close_approach_date:2020-01-01 miss_distance_km:1000"
        );
    }

    #[test]
    fn test_serializes_dates_as_iso_strings() {
        let path = OrbitPath::new("A1", date("2020-01-01"), 1000.0);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json["close_approach_date"], "2020-01-01");
        assert_eq!(json["neo_name"], "A1");
    }
}
