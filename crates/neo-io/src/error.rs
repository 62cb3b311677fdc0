use thiserror::Error;

/// A single row that cannot become an [`OrbitPath`](neo_core::OrbitPath).
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// A required column is absent or blank.
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    /// A column is present but does not parse as its declared type.
    #[error("invalid value for `{field}`: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// Errors returned while loading a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A data row failed validation. `line` is 1-based within the file.
    #[error("line {line}: {source}")]
    Record {
        line: u64,
        #[source]
        source: RecordError,
    },
}
