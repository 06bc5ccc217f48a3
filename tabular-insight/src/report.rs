//! The insight report handed to display and narration collaborators.

use serde::Serialize;
use serde_json::{json, Value};

use crate::profiler::categorical::CategoricalSummary;
use crate::profiler::inference::{ColumnType, ColumnTypeEntry};
use crate::profiler::missing::MissingValueEntry;
use crate::profiler::numeric::NumericSummary;
use crate::table::Record;

/// Row and column counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

/// Number of columns of one type, for a type-distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub data_type: ColumnType,
    pub count: usize,
}

/// Chart-ready aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    /// `Numeric` then `Categorical`, zero counts included.
    pub type_distribution: Vec<TypeCount>,
    /// Every column in table order, zero counts included.
    pub missing_by_column: Vec<MissingValueEntry>,
}

/// Complete profile of one table.
///
/// Produced once per profiling call and never mutated afterwards. Sections
/// that do not apply are empty or `None`; their absence is never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightReport {
    pub shape: Shape,
    pub column_types: Vec<ColumnTypeEntry>,
    /// Only columns with at least one missing value, in column order.
    pub missing_values: Vec<MissingValueEntry>,
    /// Present iff at least one column is numeric.
    pub numeric_summary: Option<Vec<NumericSummary>>,
    /// Present iff at least one column is categorical.
    pub categorical_summary: Option<Vec<CategoricalSummary>>,
    pub preview: Vec<Record>,
    pub charts: ChartData,
}

impl InsightReport {
    /// Inferred type of `column`, if the table has it.
    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        self.column_types
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.data_type)
    }

    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns_of(ColumnType::Numeric)
    }

    pub fn categorical_columns(&self) -> Vec<&str> {
        self.columns_of(ColumnType::Categorical)
    }

    fn columns_of(&self, data_type: ColumnType) -> Vec<&str> {
        self.column_types
            .iter()
            .filter(|entry| entry.data_type == data_type)
            .map(|entry| entry.column.as_str())
            .collect()
    }

    pub fn has_missing_values(&self) -> bool {
        !self.missing_values.is_empty()
    }

    /// One-sentence spoken summary for the narration collaborator.
    pub fn narration_summary(&self, source_name: &str) -> String {
        format!(
            "Analysis for {source_name} is complete. The dataset contains {} rows and {} columns.",
            self.shape.rows, self.shape.cols
        )
    }

    /// Structured context for an assistant prompt.
    ///
    /// `missingValues` is the string `"None"` when no column has gaps.
    pub fn assistant_context(&self) -> Value {
        let missing = if self.missing_values.is_empty() {
            json!("None")
        } else {
            json!(self.missing_values)
        };
        json!({
            "rows": self.shape.rows,
            "columns": self.shape.cols,
            "dataTypes": self.column_types,
            "missingValues": missing,
            "numericSummary": self.numeric_summary,
            "categoricalSummary": self.categorical_summary,
            "sampleData": self.preview,
        })
    }
}
