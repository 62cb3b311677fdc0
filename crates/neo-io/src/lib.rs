//! # neo-io — Ingestion and Index for NEO Search
//!
//! Turns a close-approach dataset into a read-only [`Database`].
//! The dataset file is mapped into memory, fingerprinted, and streamed
//! row by row into a [`DatabaseBuilder`], which is frozen once loading ends.

pub mod database;
pub mod error;
pub mod loader;
pub mod record;

pub use database::{Database, DatabaseBuilder, NeoAttributes, ParentId};
pub use error::{IngestError, RecordError};
pub use loader::{LoadReport, Loader, LoaderConfig, OnError};
pub use record::Record;
