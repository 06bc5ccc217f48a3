//! Column type inference.
//!
//! A column is `Numeric` when none of its non-empty cells is `Text`, i.e. every
//! value that is present matched the strict numeric literal pattern at
//! ingestion. A single non-conforming value makes it `Categorical`.
//!
//! Empty cells do not vote. A column with no non-empty cells at all is
//! therefore `Numeric` by vacuous truth: its numeric summary will be the
//! zero-count sentinel. This keeps parity with existing reports; it is a
//! questionable default and callers should not rely on it to mean anything
//! about the data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Categorical,
}

impl ColumnType {
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "Numeric",
            ColumnType::Categorical => "Categorical",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// One row of the per-column type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypeEntry {
    pub column: String,
    pub data_type: ColumnType,
}

/// Classifies a column from its cells. Stops at the first `Text` cell.
pub fn infer_column_type<'a, I>(cells: I) -> ColumnType
where
    I: IntoIterator<Item = &'a CellValue>,
{
    if cells
        .into_iter()
        .any(|cell| matches!(cell, CellValue::Text(_)))
    {
        ColumnType::Categorical
    } else {
        ColumnType::Numeric
    }
}
