//! # tabular-insight - Dataset Profiling for Rust
//!
//! tabular-insight turns an in-memory table of string-keyed records into an
//! [`InsightReport`](report::InsightReport): dataset shape, per-column type
//! inference, missing-value counts, descriptive statistics for numeric
//! columns, frequency statistics for categorical columns, a bounded preview
//! and chart-ready aggregates.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabular_insight::prelude::*;
//! use tabular_insight::sources::{CsvSource, TableSource};
//!
//! # fn main() -> tabular_insight::Result<()> {
//! let table = CsvSource::from_text("product,price\nlamp,12.5\ndesk,80\nlamp,14\n").load()?;
//! let report = Profiler::new().profile(&table)?;
//!
//! assert_eq!(report.shape.rows, 3);
//! assert_eq!(report.numeric_columns(), vec!["price"]);
//!
//! let categorical = report.categorical_summary.as_ref().unwrap();
//! assert_eq!(categorical[0].mode.as_deref(), Some("lamp"));
//!
//! println!("{}", report.narration_summary("inventory.csv"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Type Inference
//!
//! Every cell is classified once, when its record is built, as empty,
//! numeric text (matching `^-?\d*\.?\d+$`) or other text. A column is
//! numeric when no present cell is other text. Near-numeric forms such as
//! `"1e3"`, `"+5"`, `"5."` or `" 7"` make a column categorical.
//!
//! ## Failure Model
//!
//! A profiling run fails only for an empty table or, in strict schema mode,
//! for records that disagree on their columns. A column with no usable values
//! gets a zero-count summary row whose statistics are `None`; formatters
//! print those as `N/A`.
//!
//! ## Architecture
//!
//! - **`value`**, **`table`**: tagged cells, records and tables
//! - **`profiler`**: type inference, missing counts, summaries, preview and
//!   the [`Profiler`](profiler::Profiler) that assembles them
//! - **`report`**: the report and its narration/assistant views
//! - **`sources`**: CSV and JSON loaders
//! - **`formatters`**: JSON, console and Markdown rendering
//! - **`background`**: profiling on a tokio blocking thread (feature `runtime`)
//! - **`logging`**: `tracing` configuration

pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod profiler;
pub mod report;
pub mod sources;
pub mod table;
pub mod value;

#[cfg(feature = "runtime")]
pub mod background;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

pub use error::{InsightError, Result};
pub use profiler::profile;
