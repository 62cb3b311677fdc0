//! # neo-query — Search over the NEO Index
//!
//! Raw query options ([`QueryConfig`]) are normalized into a [`QuerySpec`],
//! which [`NeoSearcher`] runs against a [`Database`]:
//!
//! ```text
//! date selection → object filters → approach expansion → approach filters
//!                → de-duplication → limit
//! ```

pub mod error;
pub mod executor;
pub mod filter;
pub mod parser;

pub use error::QueryError;
pub use executor::{dedup_stable, take_limit, NeoSearcher, SearchResults};
pub use filter::{Comparison, Field, FieldValue, FilterGroups, FilterSpec, Filterable};
pub use parser::{DateSearch, QueryConfig, QuerySpec, ReturnObject, DEFAULT_LIMIT};

use neo_io::Database;

/// Build `config` and run it against `db`.
pub fn search<'db>(
    db: &'db Database,
    config: &QueryConfig,
) -> Result<SearchResults<'db>, QueryError> {
    let spec = QuerySpec::build(config)?;
    Ok(NeoSearcher::new(db).get_objects(&spec))
}
