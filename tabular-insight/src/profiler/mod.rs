//! Single-pass-per-column profiling of an in-memory table.
//!
//! The [`Profiler`] turns a [`Table`] into an [`InsightReport`]:
//!
//! 1. Validate shape: the table must be non-empty and, in
//!    [`SchemaMode::Strict`], every record must carry the first record's keys.
//! 2. Transpose records into columns, reading absent keys as empty cells.
//! 3. Per column, infer its type, count missing cells and summarize it with
//!    the numeric or categorical summarizer.
//! 4. Assemble the report, preview and chart aggregates.
//!
//! Profiling is a pure function of the table and the configuration; the same
//! input always produces an identical report.
//!
//! # Example
//!
//! ```rust
//! use tabular_insight::prelude::*;
//!
//! let table: Table = vec![
//!     Record::new().with("city", "Oslo").with("temp", "4.5"),
//!     Record::new().with("city", "Lima").with("temp", "19"),
//! ]
//! .into();
//!
//! let report = Profiler::builder()
//!     .preview(PreviewSize::Compact)
//!     .build()
//!     .profile(&table)
//!     .unwrap();
//!
//! assert_eq!(report.shape.rows, 2);
//! assert_eq!(report.column_type("temp"), Some(ColumnType::Numeric));
//! ```

pub mod categorical;
pub mod inference;
pub mod missing;
pub mod numeric;
pub mod preview;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{InsightError, Result};
use crate::log_column;
use crate::logging::{truncate_field, LogConfig};
use crate::report::{ChartData, InsightReport, Shape, TypeCount};
use crate::table::Table;
use crate::value::{CellValue, ABSENT};

pub use categorical::{summarize_categorical, CategoricalSummary, FrequencyTable};
pub use inference::{infer_column_type, ColumnType, ColumnTypeEntry};
pub use missing::{count_missing, MissingValueEntry};
pub use numeric::{round_to, summarize_numeric, NumericSummary, DECIMAL_PLACES};
pub use preview::{extract_preview, PreviewSize};

/// How records that disagree on their key set are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchemaMode {
    /// Any record whose keys differ from the first record's fails the run.
    #[default]
    Strict,
    /// The first record defines the columns. Absent keys are missing values
    /// and extra keys are ignored.
    Lenient,
}

/// Configuration for a [`Profiler`].
#[derive(Debug, Clone, Default)]
pub struct ProfilerConfig {
    pub preview: PreviewSize,
    pub schema_mode: SchemaMode,
    pub log: LogConfig,
}

/// Progress callback invoked once per profiled column
pub type ProgressCallback = Arc<dyn Fn(ProfileProgress) + Send + Sync>;

/// Progress information during profiling
#[derive(Debug, Clone)]
pub struct ProfileProgress {
    /// Zero-based index of the column just profiled
    pub column_index: usize,
    pub total_columns: usize,
    pub column_name: String,
    pub data_type: ColumnType,
}

/// Builder for [`Profiler`]
#[derive(Default)]
pub struct ProfilerBuilder {
    config: ProfilerConfig,
    progress_callback: Option<ProgressCallback>,
}

impl ProfilerBuilder {
    /// Set how many leading rows the report carries
    pub fn preview(mut self, size: PreviewSize) -> Self {
        self.config.preview = size;
        self
    }

    /// Set how inconsistent key sets are handled
    pub fn schema_mode(mut self, mode: SchemaMode) -> Self {
        self.config.schema_mode = mode;
        self
    }

    /// Set logging verbosity for profiling runs
    pub fn log_config(mut self, log: LogConfig) -> Self {
        self.config.log = log;
        self
    }

    /// Set progress callback
    pub fn progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProfileProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    pub fn build(self) -> Profiler {
        Profiler {
            config: self.config,
            progress_callback: self.progress_callback,
        }
    }
}

/// Profiles tables into [`InsightReport`]s.
///
/// A profiler holds only configuration, so one instance can be shared across
/// threads and reused for any number of tables.
#[derive(Clone, Default)]
pub struct Profiler {
    config: ProfilerConfig,
    progress_callback: Option<ProgressCallback>,
}

impl std::fmt::Debug for Profiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profiler")
            .field("config", &self.config)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl Profiler {
    pub fn builder() -> ProfilerBuilder {
        ProfilerBuilder::default()
    }

    /// Create a Profiler with default configuration
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn with_config(config: ProfilerConfig) -> Self {
        Self {
            config,
            progress_callback: None,
        }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profiles `table` into a report.
    ///
    /// # Errors
    ///
    /// * [`InsightError::EmptyInput`] if the table has no records.
    /// * [`InsightError::SchemaInconsistency`] in strict mode if any record's
    ///   key set differs from the first record's.
    ///
    /// Nothing that happens inside a single column is an error.
    #[instrument(skip(self, table), fields(rows = table.row_count()))]
    pub fn profile(&self, table: &Table) -> Result<InsightReport> {
        match self.config.schema_mode {
            SchemaMode::Strict => table.check_schema()?,
            SchemaMode::Lenient if table.is_empty() => return Err(InsightError::EmptyInput),
            SchemaMode::Lenient => {}
        }

        let columns = table.columns();
        info!(
            rows = table.row_count(),
            columns = columns.len(),
            schema_mode = ?self.config.schema_mode,
            "Starting table profiling"
        );

        let cells = transpose(table, &columns);

        let mut column_types = Vec::with_capacity(columns.len());
        let mut missing_by_column = Vec::with_capacity(columns.len());
        let mut numeric_rows = Vec::new();
        let mut categorical_rows = Vec::new();

        for (index, (&name, column)) in columns.iter().zip(&cells).enumerate() {
            let data_type = infer_column_type(column.iter().copied());
            let missing_count = count_missing(column.iter().copied());

            log_column!(
                self.config.log,
                column = %truncate_field(name, self.config.log.max_field_length),
                data_type = %data_type,
                missing = missing_count,
                "Classified column"
            );

            match data_type {
                ColumnType::Numeric => {
                    let summary = summarize_numeric(name, column.iter().copied());
                    if !summary.is_available() {
                        debug!(column = name, "Numeric column has no usable values");
                    }
                    numeric_rows.push(summary);
                }
                ColumnType::Categorical => {
                    let summary = summarize_categorical(name, column.iter().copied());
                    if !summary.is_available() {
                        debug!(column = name, "Categorical column has no present values");
                    }
                    categorical_rows.push(summary);
                }
            }

            column_types.push(ColumnTypeEntry {
                column: name.to_string(),
                data_type,
            });
            missing_by_column.push(MissingValueEntry {
                column: name.to_string(),
                missing_count,
            });

            self.report_progress(index, columns.len(), name, data_type);
        }

        let missing_values = missing_by_column
            .iter()
            .filter(|entry| entry.missing_count > 0)
            .cloned()
            .collect();

        let charts = ChartData {
            type_distribution: vec![
                TypeCount {
                    data_type: ColumnType::Numeric,
                    count: numeric_rows.len(),
                },
                TypeCount {
                    data_type: ColumnType::Categorical,
                    count: categorical_rows.len(),
                },
            ],
            missing_by_column,
        };

        let report = InsightReport {
            shape: Shape {
                rows: table.row_count(),
                cols: columns.len(),
            },
            column_types,
            missing_values,
            numeric_summary: non_empty(numeric_rows),
            categorical_summary: non_empty(categorical_rows),
            preview: extract_preview(table, self.config.preview),
            charts,
        };

        info!(
            rows = report.shape.rows,
            columns = report.shape.cols,
            numeric = report.charts.type_distribution[0].count,
            categorical = report.charts.type_distribution[1].count,
            "Completed table profiling"
        );

        Ok(report)
    }

    fn report_progress(
        &self,
        column_index: usize,
        total_columns: usize,
        name: &str,
        data_type: ColumnType,
    ) {
        if let Some(callback) = &self.progress_callback {
            callback(ProfileProgress {
                column_index,
                total_columns,
                column_name: name.to_string(),
                data_type,
            });
        }
    }
}

/// Column-major view of the table restricted to `columns`.
///
/// Absent keys stay as the shared empty cell; keys outside `columns` are
/// dropped.
fn transpose<'a>(table: &'a Table, columns: &[&str]) -> Vec<Vec<&'a CellValue>> {
    let slot: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(index, &name)| (name, index))
        .collect();

    let mut cells = vec![vec![&ABSENT; table.row_count()]; columns.len()];
    for (row, record) in table.records().iter().enumerate() {
        for (name, value) in record.iter() {
            if let Some(&col) = slot.get(name) {
                cells[col][row] = value;
            }
        }
    }
    cells
}

fn non_empty<T>(rows: Vec<T>) -> Option<Vec<T>> {
    if rows.is_empty() {
        None
    } else {
        Some(rows)
    }
}

/// Profiles `table` with the default configuration.
pub fn profile(table: &Table) -> Result<InsightReport> {
    Profiler::new().profile(table)
}
