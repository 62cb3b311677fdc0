//! # Loader — Memory-Mapped Dataset Ingestion
//!
//! The dataset file is mapped read-only into memory and parsed in place.
//! A CRC32 over the mapped bytes fingerprints the exact dataset a
//! [`Database`] was built from.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};

use crate::database::{Database, DatabaseBuilder};
use crate::error::IngestError;
use crate::record::{Record, DEFAULT_COLUMNS};

/// What to do with a row that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Fail the whole load on the first bad row.
    #[default]
    Abort,
    /// Log the row, count it, and keep going.
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// First row names the columns. Header-less files use [`DEFAULT_COLUMNS`].
    #[serde(default = "default_has_header")]
    pub has_header: bool,

    /// Metadata rows to discard before data begins (after the header).
    #[serde(default)]
    pub skip_rows: usize,

    #[serde(default)]
    pub on_error: OnError,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            skip_rows: 0,
            on_error: OnError::Abort,
        }
    }
}

fn default_has_header() -> bool {
    true
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Rows recorded into the index.
    pub rows: usize,
    /// Rows dropped under [`OnError::Skip`].
    pub skipped: usize,
    /// CRC32 of the raw dataset bytes.
    pub checksum: u32,
}

pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Map the file at `path` and load it.
    pub fn load_path(&self, path: &Path) -> Result<(Database, LoadReport), IngestError> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return self.load_bytes(&[]);
        }

        // SAFETY: the mapping is read-only and dropped before this function
        // returns. The dataset is treated as immutable while loading; a
        // concurrent writer truncating the file is outside our contract.
        let mmap = unsafe { Mmap::map(&file)? };

        tracing::debug!("Mapped {} ({} bytes)", path.display(), mmap.len());
        self.load_bytes(&mmap)
    }

    /// Load from an in-memory dataset.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<(Database, LoadReport), IngestError> {
        let checksum = crc32fast::hash(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(self.config.has_header)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(bytes);

        let headers = if self.config.has_header {
            reader.headers()?.clone()
        } else {
            StringRecord::from(DEFAULT_COLUMNS.to_vec())
        };

        let mut builder = DatabaseBuilder::new();
        let mut rows = 0;
        let mut skipped = 0;

        for (n, result) in reader.records().enumerate() {
            if n < self.config.skip_rows {
                continue;
            }

            let row = match result {
                Ok(row) => row,
                Err(e) => match self.config.on_error {
                    OnError::Abort => return Err(e.into()),
                    OnError::Skip => {
                        tracing::warn!("Skipping unreadable row: {}", e);
                        skipped += 1;
                        continue;
                    }
                },
            };

            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let record = Record::from_pairs(headers.iter().zip(row.iter()));

            match builder.record(&record) {
                Ok(_) => rows += 1,
                Err(source) => match self.config.on_error {
                    OnError::Abort => return Err(IngestError::Record { line, source }),
                    OnError::Skip => {
                        tracing::warn!("Skipping line {}: {}", line, source);
                        skipped += 1;
                    }
                },
            }
        }

        let database = builder.build();
        tracing::info!(
            "Loaded {} approaches for {} objects ({} skipped, crc32 {:08x})",
            rows,
            database.len(),
            skipped,
            checksum
        );

        Ok((
            database,
            LoadReport {
                rows,
                skipped,
                checksum,
            },
        ))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}
