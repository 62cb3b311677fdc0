//! # Query Normalization
//!
//! Turns loosely-typed query options into a validated [`QuerySpec`].
//!
//! Recognized options:
//! ```text
//! date          exact approach date           (YYYY-MM-DD)
//! start_date    inclusive range start         (used when `date` is absent)
//! end_date      inclusive range end
//! filter        ["field:operator:value", ...] (applied in order)
//! number        result cap, integer or numeric string (default 100)
//! return_object "NEO" | "Path"                (default "NEO")
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use neo_core::parse_date;

use crate::error::QueryError;
use crate::filter::FilterSpec;

/// Result cap applied when `number` is not given.
pub const DEFAULT_LIMIT: usize = 100;

/// Raw query options, as read from a CLI, a config file, or JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub filter: Vec<String>,
    #[serde(default, deserialize_with = "integer_like")]
    pub number: Option<i64>,
    pub return_object: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntegerLike {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accepts `5`, `5.0`, `"5"` and `"5.0"`; rejects fractional values.
fn integer_like<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    match Option::<IntegerLike>::deserialize(d)? {
        None => Ok(None),
        Some(IntegerLike::Int(n)) => Ok(Some(n)),
        Some(IntegerLike::Float(f)) => integral(f).map(Some).map_err(de::Error::custom),
        Some(IntegerLike::Text(s)) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(n) => Ok(Some(n)),
                Err(_) => s
                    .parse::<f64>()
                    .map_err(|_| format!("invalid number {s:?}"))
                    .and_then(integral)
                    .map(Some)
                    .map_err(de::Error::custom),
            }
        }
    }
}

fn integral(f: f64) -> Result<i64, String> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(format!("number must be a whole number, got {f}"))
    }
}

/// Blank date options count as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// How candidates are selected from the date index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSearch {
    Equals(NaiveDate),
    /// Inclusive on both ends. An inverted range selects nothing.
    Between { start: NaiveDate, end: NaiveDate },
}

/// Which entity kind a query returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ReturnObject {
    #[default]
    #[serde(rename = "NEO")]
    Neo,
    Path,
}

impl FromStr for ReturnObject {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEO" => Ok(Self::Neo),
            "Path" => Ok(Self::Path),
            other => Err(QueryError::UnknownReturnObject(other.to_string())),
        }
    }
}

impl fmt::Display for ReturnObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neo => write!(f, "NEO"),
            Self::Path => write!(f, "Path"),
        }
    }
}

/// A validated query, ready for [`NeoSearcher`](crate::NeoSearcher).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySpec {
    pub date_search: DateSearch,
    /// Recognized filters in input order.
    pub filters: Vec<FilterSpec>,
    pub limit: usize,
    pub return_object: ReturnObject,
}

impl QuerySpec {
    pub fn build(config: &QueryConfig) -> Result<Self, QueryError> {
        let dates = (
            present(&config.date),
            present(&config.start_date),
            present(&config.end_date),
        );
        let date_search = match dates {
            (Some(date), _, _) => DateSearch::Equals(date_option("date", date)?),
            (None, Some(start), Some(end)) => DateSearch::Between {
                start: date_option("start_date", start)?,
                end: date_option("end_date", end)?,
            },
            _ => return Err(QueryError::MissingDateSelection),
        };

        let mut filters = Vec::with_capacity(config.filter.len());
        for token in &config.filter {
            if let Some(filter) = FilterSpec::parse(token)? {
                filters.push(filter);
            }
        }

        // Negative caps select nothing.
        let limit = match config.number {
            Some(n) => usize::try_from(n).unwrap_or(0),
            None => DEFAULT_LIMIT,
        };

        let return_object = match config.return_object.as_deref() {
            Some(raw) => raw.parse()?,
            None => ReturnObject::default(),
        };

        Ok(Self {
            date_search,
            filters,
            limit,
            return_object,
        })
    }
}

fn date_option(option: &'static str, value: &str) -> Result<NaiveDate, QueryError> {
    parse_date(value).ok_or_else(|| QueryError::InvalidDate {
        option,
        value: value.to_string(),
    })
}
