//! Bounded head slice of a table.

use serde::{Deserialize, Serialize};

use crate::table::{Record, Table};

/// How many leading rows the report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PreviewSize {
    /// 5 rows, for compact display
    #[default]
    Compact,
    /// 100 rows, for paged display
    Paged,
}

impl PreviewSize {
    pub fn rows(&self) -> usize {
        match self {
            PreviewSize::Compact => 5,
            PreviewSize::Paged => 100,
        }
    }
}

/// The first `size.rows()` records, unmodified and in table order.
pub fn extract_preview(table: &Table, size: PreviewSize) -> Vec<Record> {
    table.records().iter().take(size.rows()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_table(rows: usize) -> Table {
        (0..rows)
            .map(|i| Record::new().with("i", i.to_string()))
            .collect()
    }

    #[test]
    fn test_compact_preview_is_prefix() {
        let table = numbered_table(1000);
        let preview = extract_preview(&table, PreviewSize::Compact);
        assert_eq!(preview.len(), 5);
        assert_eq!(preview.as_slice(), &table.records()[..5]);
    }

    #[test]
    fn test_paged_preview() {
        let table = numbered_table(250);
        assert_eq!(extract_preview(&table, PreviewSize::Paged).len(), 100);
    }

    #[test]
    fn test_short_table_returns_everything() {
        let table = numbered_table(3);
        assert_eq!(extract_preview(&table, PreviewSize::Paged).len(), 3);
    }
}
