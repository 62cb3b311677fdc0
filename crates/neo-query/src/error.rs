use thiserror::Error;

/// Errors raised while turning raw query options into a [`QuerySpec`](crate::QuerySpec).
///
/// Execution itself never fails: once a query is built it always yields a
/// (possibly empty) result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Neither `date` nor both of `start_date`/`end_date` were supplied.
    #[error("a date or both start_date and end_date are required")]
    MissingDateSelection,

    #[error("invalid {option}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { option: &'static str, value: String },

    #[error("unknown return_object {0:?} (expected \"NEO\" or \"Path\")")]
    UnknownReturnObject(String),

    /// A filter on a known field that is not `field:operator:value`.
    #[error("malformed filter {0:?} (expected field:operator:value)")]
    MalformedFilter(String),

    #[error("unsupported filter operator {operator:?} in {token:?} (supported: =, >, >=)")]
    UnsupportedOperator { operator: String, token: String },
}
