//! # Filters
//!
//! A filter token has the form `field:operator:value`. Only the first two
//! colons are structural, so a value may itself contain `:`.
//!
//! Field names resolve through a fixed registry to a [`Field`], which knows
//! the entity kind that declares it and how to read it. Unknown field names
//! are dropped rather than failing the query; unknown operators are a hard
//! error, since silently ignoring one would change the result set.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use neo_core::{EntityKind, NearEarthObject, OrbitPath};

use crate::error::QueryError;

// =============================================================================
// Field registry
// =============================================================================

/// A filterable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// `NearEarthObject::is_potentially_hazardous`
    Hazardous,
    /// `NearEarthObject::diameter_min_km`
    Diameter,
    /// `OrbitPath::miss_distance_km`
    Distance,
}

/// Filter name → field. `is_hazardous` is accepted as an alias.
const REGISTRY: &[(&str, Field)] = &[
    ("hazardous", Field::Hazardous),
    ("is_hazardous", Field::Hazardous),
    ("diameter", Field::Diameter),
    ("distance", Field::Distance),
];

impl Field {
    pub fn lookup(name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, field)| field)
    }

    /// Canonical filter name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hazardous => "hazardous",
            Self::Diameter => "diameter",
            Self::Distance => "distance",
        }
    }

    /// The entity kind declaring this field. No field is declared on both
    /// kinds; if one ever were, `NearEarthObject` would take precedence.
    pub fn kind(self) -> EntityKind {
        match self {
            Self::Hazardous | Self::Diameter => EntityKind::NearEarthObject,
            Self::Distance => EntityKind::OrbitPath,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed attribute value read off an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
}

impl FieldValue {
    /// Compare against a literal coerced to this value's type.
    /// `None` when the literal does not coerce.
    fn typed_cmp(self, literal: &str) -> Option<Ordering> {
        match self {
            Self::Number(n) => n.partial_cmp(&literal.parse::<f64>().ok()?),
            Self::Bool(b) => Some(b.cmp(&neo_io::record::parse_bool(literal)?)),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Anything a [`FilterSpec`] can be evaluated against.
pub trait Filterable {
    /// Value of `field`, or `None` if this kind does not declare it.
    fn field_value(&self, field: Field) -> Option<FieldValue>;
}

impl Filterable for NearEarthObject {
    fn field_value(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::Hazardous => Some(FieldValue::Bool(self.is_potentially_hazardous)),
            Field::Diameter => Some(FieldValue::Number(self.diameter_min_km)),
            Field::Distance => None,
        }
    }
}

impl Filterable for OrbitPath {
    fn field_value(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::Distance => Some(FieldValue::Number(self.miss_distance_km)),
            Field::Hazardous | Field::Diameter => None,
        }
    }
}

// =============================================================================
// Operators
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Eq,
    Gt,
    Gte,
}

impl Comparison {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Eq),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Gte),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }

    /// Whether `attribute <op> literal` holds for the given ordering of
    /// attribute relative to literal.
    #[inline]
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Gt => ordering == Ordering::Greater,
            Self::Gte => ordering != Ordering::Less,
        }
    }

    /// Two-stage comparison: coerce the literal to the attribute's type, and
    /// compare both as text when that fails.
    pub fn evaluate(self, attribute: FieldValue, literal: &str) -> bool {
        let literal = literal.trim();
        let ordering = attribute
            .typed_cmp(literal)
            .unwrap_or_else(|| attribute.to_string().as_str().cmp(literal));
        self.accepts(ordering)
    }
}

// =============================================================================
// FilterSpec
// =============================================================================

/// One parsed `field:operator:value` predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSpec {
    pub field: Field,
    pub kind: EntityKind,
    pub op: Comparison,
    /// Literal kept as text; coerced at comparison time.
    pub value: String,
}

impl FilterSpec {
    pub fn new(field: Field, op: Comparison, value: impl Into<String>) -> Self {
        Self {
            field,
            kind: field.kind(),
            op,
            value: value.into(),
        }
    }

    /// Parse a raw token. `Ok(None)` means the field is unknown and the
    /// token should be ignored.
    pub fn parse(token: &str) -> Result<Option<Self>, QueryError> {
        let mut parts = token.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim();

        let Some(field) = Field::lookup(name) else {
            tracing::debug!("Ignoring filter on unknown field: {:?}", token);
            return Ok(None);
        };

        let (Some(symbol), Some(value)) = (parts.next(), parts.next()) else {
            return Err(QueryError::MalformedFilter(token.to_string()));
        };

        let op = Comparison::from_symbol(symbol.trim()).ok_or_else(|| {
            QueryError::UnsupportedOperator {
                operator: symbol.to_string(),
                token: token.to_string(),
            }
        })?;

        Ok(Some(Self::new(field, op, value)))
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        match item.field_value(self.field) {
            Some(attribute) => self.op.evaluate(attribute, &self.value),
            None => false,
        }
    }

    /// Keep the items satisfying this filter, preserving order.
    pub fn apply<'a, T: Filterable>(&self, items: Vec<&'a T>) -> Vec<&'a T> {
        items.into_iter().filter(|item| self.matches(*item)).collect()
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.field, self.op.symbol(), self.value)
    }
}

/// Filters split by the entity kind they target, each group in input order.
#[derive(Debug, Default)]
pub struct FilterGroups<'a> {
    pub neo: Vec<&'a FilterSpec>,
    pub path: Vec<&'a FilterSpec>,
}

impl<'a> FilterGroups<'a> {
    pub fn of(filters: &'a [FilterSpec]) -> Self {
        let mut groups = Self::default();
        for filter in filters {
            match filter.kind {
                EntityKind::NearEarthObject => groups.neo.push(filter),
                EntityKind::OrbitPath => groups.path.push(filter),
            }
        }
        groups
    }

    pub fn for_kind(&self, kind: EntityKind) -> &[&'a FilterSpec] {
        match kind {
            EntityKind::NearEarthObject => &self.neo,
            EntityKind::OrbitPath => &self.path,
        }
    }
}
