//! # Database — The Read-Only Index
//!
//! Two derived mappings over one arena of [`NearEarthObject`]s:
//!
//! - **by date**: approach date → objects with an approach on that date. An
//!   object appears once per approach, so several approaches on the same
//!   day produce repeated entries. Queries de-duplicate later.
//! - **by name**: object name → the single instance carrying that name.
//!
//! The index is assembled through [`DatabaseBuilder`] and frozen by
//! [`DatabaseBuilder::build`]. A [`Database`] hands out shared borrows only,
//! so any number of readers may query it concurrently.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use neo_core::{NearEarthObject, OrbitPath};

use crate::error::RecordError;
use crate::record::{Record, FIELD_DIAMETER_MIN_KM, FIELD_HAZARDOUS, FIELD_NAME};

/// Position of an object in the database arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParentId(usize);

/// Object-level attributes carried by a row. Diameter and hazard flag are
/// required only when the row introduces a name the index has not seen yet;
/// a missing `id` falls back to the name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeoAttributes {
    pub id: Option<String>,
    pub diameter_min_km: Option<f64>,
    pub is_potentially_hazardous: Option<bool>,
}

// =============================================================================
// Builder
// =============================================================================

/// Mutable staging area for ingestion.
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    neos: Vec<NearEarthObject>,
    by_name: HashMap<String, ParentId>,
    by_date: BTreeMap<NaiveDate, Vec<ParentId>>,
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a raw row and record it. Object attributes are only parsed
    /// for names not yet indexed.
    pub fn record(&mut self, record: &Record) -> Result<ParentId, RecordError> {
        let orbit = record.orbit_path()?;
        let attrs = if self.by_name.contains_key(&orbit.neo_name) {
            NeoAttributes::default()
        } else {
            record.neo_attributes()?
        };
        self.record_orbit(orbit, attrs)
    }

    /// Attach `orbit` to its owner, creating the owner from `attrs` on first
    /// sight of its name, and register the owner under the approach date.
    ///
    /// Attributes on later rows for a known name are ignored; the first row
    /// wins. Nothing is modified when an error is returned.
    pub fn record_orbit(
        &mut self,
        orbit: OrbitPath,
        attrs: NeoAttributes,
    ) -> Result<ParentId, RecordError> {
        if orbit.neo_name.trim().is_empty() {
            return Err(RecordError::MissingField { field: FIELD_NAME });
        }

        let parent = match self.by_name.get(&orbit.neo_name) {
            Some(&id) => id,
            None => {
                let neo = NearEarthObject::new(
                    attrs.id.unwrap_or_else(|| orbit.neo_name.clone()),
                    orbit.neo_name.clone(),
                    attrs.diameter_min_km.ok_or(RecordError::MissingField {
                        field: FIELD_DIAMETER_MIN_KM,
                    })?,
                    attrs.is_potentially_hazardous.ok_or(RecordError::MissingField {
                        field: FIELD_HAZARDOUS,
                    })?,
                );
                let id = ParentId(self.neos.len());
                self.neos.push(neo);
                self.by_name.insert(orbit.neo_name.clone(), id);
                id
            }
        };

        self.by_date
            .entry(orbit.close_approach_date)
            .or_default()
            .push(parent);
        self.neos[parent.0].update_orbits(orbit);
        Ok(parent)
    }

    pub fn len(&self) -> usize {
        self.neos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neos.is_empty()
    }

    /// Freeze the index.
    pub fn build(self) -> Database {
        Database {
            neos: self.neos,
            by_name: self.by_name,
            by_date: self.by_date,
        }
    }
}

// =============================================================================
// Frozen index
// =============================================================================

/// Immutable index over every ingested object and approach.
#[derive(Debug, Default)]
pub struct Database {
    neos: Vec<NearEarthObject>,
    by_name: HashMap<String, ParentId>,
    by_date: BTreeMap<NaiveDate, Vec<ParentId>>,
}

impl Database {
    /// Approach date → owners, one entry per approach, dates ascending.
    #[inline]
    pub fn by_date(&self) -> &BTreeMap<NaiveDate, Vec<ParentId>> {
        &self.by_date
    }

    /// Name → owner.
    #[inline]
    pub fn by_name(&self) -> &HashMap<String, ParentId> {
        &self.by_name
    }

    /// Resolve an arena position. Ids only come from this database, so the
    /// lookup is always in bounds.
    #[inline]
    pub fn neo(&self, id: ParentId) -> &NearEarthObject {
        &self.neos[id.0]
    }

    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    pub fn neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.by_name.get(name).map(|&id| self.neo(id))
    }

    /// Owners of approaches on exactly `date`, repeats included.
    pub fn neos_on(&self, date: NaiveDate) -> impl Iterator<Item = &NearEarthObject> + '_ {
        self.by_date
            .get(&date)
            .into_iter()
            .flatten()
            .map(|&id| self.neo(id))
    }

    /// Owners of approaches within `[start, end]`, in ascending date order,
    /// repeats included. An inverted range is empty.
    pub fn neos_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &NearEarthObject> + '_ {
        // BTreeMap::range panics on inverted bounds.
        let range = (start <= end).then(|| self.by_date.range(start..=end));
        range
            .into_iter()
            .flatten()
            .flat_map(|(_, ids)| ids.iter())
            .map(|&id| self.neo(id))
    }

    /// Number of distinct objects.
    pub fn len(&self) -> usize {
        self.neos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neos.is_empty()
    }

    /// Number of approaches across all objects.
    pub fn orbit_count(&self) -> usize {
        self.neos.iter().map(|n| n.orbits.len()).sum()
    }

    /// Earliest and latest approach dates, if any.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.by_date.keys().next()?;
        let last = self.by_date.keys().next_back()?;
        Some((*first, *last))
    }
}
