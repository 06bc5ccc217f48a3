//! Data sources that produce [`Table`]s for profiling.
//!
//! The profiler only ever sees an in-memory [`Table`]. Sources turn delimited
//! text or JSON documents into one, classifying every cell as they go.
//!
//! # Examples
//!
//! ```rust
//! use tabular_insight::sources::{CsvSource, TableSource};
//!
//! let source = CsvSource::from_text("name,age\nAna,31\nBo,27\n");
//! let table = source.load().unwrap();
//! assert_eq!(table.row_count(), 2);
//! ```

use std::fmt::Debug;

use crate::error::Result;
use crate::table::Table;

pub mod csv;
pub mod json;

pub use self::csv::{CsvOptions, CsvSource};
pub use self::json::{table_from_json, JsonSource};

/// A source that can be loaded into a [`Table`].
///
/// Implementations are read-only: loading the same source twice yields equal
/// tables as long as the underlying data has not changed.
pub trait TableSource: Debug + Send + Sync {
    /// Reads the whole source into memory.
    fn load(&self) -> Result<Table>;

    /// Returns a human-readable description of this source.
    fn description(&self) -> String;
}
