//! # Record — One Flat Dataset Row
//!
//! A row is a plain `column -> text` mapping. Typed extraction happens here
//! so the index only ever sees validated values.

use std::collections::HashMap;

use neo_core::{parse_date, OrbitPath};

use crate::database::NeoAttributes;
use crate::error::RecordError;

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_DIAMETER_MIN_KM: &str = "estimated_diameter_min_kilometers";
pub const FIELD_HAZARDOUS: &str = "is_potentially_hazardous_asteroid";
pub const FIELD_APPROACH_DATE: &str = "close_approach_date";
pub const FIELD_MISS_DISTANCE_KM: &str = "miss_distance_kilometers";

/// Column order assumed for files without a header row.
pub const DEFAULT_COLUMNS: [&str; 6] = [
    FIELD_ID,
    FIELD_NAME,
    FIELD_DIAMETER_MIN_KM,
    FIELD_HAZARDOUS,
    FIELD_APPROACH_DATE,
    FIELD_MISS_DISTANCE_KM,
];

/// A single ingested row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the trimmed value of `field`, treating blanks as absent.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn require(&self, field: &'static str) -> Result<&str, RecordError> {
        self.get(field).ok_or(RecordError::MissingField { field })
    }

    /// Extract the close approach carried by this row.
    /// Name, date and distance are required on every row.
    pub fn orbit_path(&self) -> Result<OrbitPath, RecordError> {
        let name = self.require(FIELD_NAME)?;
        let date = parse_field(
            self.require(FIELD_APPROACH_DATE)?,
            FIELD_APPROACH_DATE,
            parse_date,
        )?;
        let distance = parse_field(
            self.require(FIELD_MISS_DISTANCE_KM)?,
            FIELD_MISS_DISTANCE_KM,
            parse_measure,
        )?;
        Ok(OrbitPath::new(name, date, distance))
    }

    /// Extract whatever object attributes this row carries. Absent columns
    /// stay `None`; present but unparseable ones are an error.
    pub fn neo_attributes(&self) -> Result<NeoAttributes, RecordError> {
        Ok(NeoAttributes {
            id: self.get(FIELD_ID).map(str::to_string),
            diameter_min_km: self
                .get(FIELD_DIAMETER_MIN_KM)
                .map(|v| parse_field(v, FIELD_DIAMETER_MIN_KM, parse_measure))
                .transpose()?,
            is_potentially_hazardous: self
                .get(FIELD_HAZARDOUS)
                .map(|v| parse_field(v, FIELD_HAZARDOUS, parse_bool))
                .transpose()?,
        })
    }
}

fn parse_field<T>(
    raw: &str,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, RecordError> {
    parse(raw).ok_or_else(|| RecordError::InvalidValue {
        field,
        value: raw.to_string(),
    })
}

/// Diameters and distances: finite and non-negative.
fn parse_measure(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Accepts `true`/`false` in any case, as exported by the source catalogue.
pub fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
