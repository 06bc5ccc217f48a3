//! Prelude for commonly used types and traits in tabular-insight.

pub use crate::error::{InsightError, Result};
pub use crate::formatters::{FormatterConfig, ReportFormatter};
pub use crate::logging::LogConfig;
pub use crate::profiler::{
    profile, ColumnType, PreviewSize, Profiler, ProfilerConfig, SchemaMode,
};
pub use crate::report::InsightReport;
pub use crate::table::{Record, Table};
pub use crate::value::CellValue;
