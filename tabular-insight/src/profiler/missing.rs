//! Missing-value counting.
//!
//! Missing means `CellValue::Empty`: null, an absent key, or the exact empty
//! string. No trimming is applied, so `" "` is present.

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// Missing-value count for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingValueEntry {
    pub column: String,
    pub missing_count: usize,
}

pub fn count_missing<'a, I>(cells: I) -> usize
where
    I: IntoIterator<Item = &'a CellValue>,
{
    cells.into_iter().filter(|cell| cell.is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_empty_and_null() {
        let column = vec![
            CellValue::from_text("x"),
            CellValue::from_text(""),
            CellValue::from(None::<&str>),
            CellValue::from_text("y"),
        ];
        assert_eq!(count_missing(&column), 2);
    }

    #[test]
    fn test_whitespace_and_zero_are_present() {
        let column = vec![CellValue::from_text(" "), CellValue::from_text("0")];
        assert_eq!(count_missing(&column), 0);
    }
}
