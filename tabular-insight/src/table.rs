//! Records and tables handed over by the parsing collaborator.

use std::collections::HashSet;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{InsightError, Result};
use crate::value::{CellValue, ABSENT};

/// One row: an ordered mapping from column name to cell.
///
/// Column names are unique within a record; inserting an existing name
/// replaces its cell in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, builder style.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Builds a record from a JSON object, preserving key order.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            InsightError::source_error("JSON", format!("expected an object, found {value}"))
        })?;
        Ok(object
            .iter()
            .map(|(k, v)| (k.clone(), CellValue::from_json(v)))
            .collect())
    }

    /// Returns the cell for `column`, or `None` if the key is absent.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns the cell for `column`, treating an absent key as empty.
    pub fn get_or_empty(&self, column: &str) -> &CellValue {
        self.get(column).unwrap_or(&ABSENT)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// An ordered, in-memory sequence of records.
///
/// The schema is the first record's keys, in order. A `Table` is never
/// mutated once handed to the profiler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Builds a table from a JSON array of objects.
    pub fn from_json(value: &Value) -> Result<Self> {
        let rows = value.as_array().ok_or_else(|| {
            InsightError::source_error("JSON", "expected an array of objects")
        })?;
        let records = rows.iter().map(Record::from_json).collect::<Result<Vec<_>>>()?;
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Column names derived from the first record. Empty for an empty table.
    pub fn columns(&self) -> Vec<&str> {
        self.records
            .first()
            .map(|first| first.columns().collect())
            .unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.records.first().map_or(0, Record::len)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Checks that every record carries exactly the first record's key set.
    ///
    /// Returns the first offending row. Key order within a record is not
    /// compared.
    pub fn check_schema(&self) -> Result<()> {
        let Some(first) = self.records.first() else {
            return Err(InsightError::EmptyInput);
        };
        let schema: HashSet<&str> = first.columns().collect();

        for (row, record) in self.records.iter().enumerate().skip(1) {
            let unexpected: Vec<String> = record
                .columns()
                .filter(|c| !schema.contains(c))
                .map(str::to_string)
                .collect();
            let missing: Vec<String> = first
                .columns()
                .filter(|c| record.get(c).is_none())
                .map(str::to_string)
                .collect();

            if !missing.is_empty() || !unexpected.is_empty() {
                return Err(InsightError::SchemaInconsistency {
                    row,
                    missing,
                    unexpected,
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<Record>> for Table {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_preserves_order_and_replaces() {
        let record = Record::new()
            .with("b", "1")
            .with("a", "x")
            .with("b", "2");
        assert_eq!(record.columns().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(record.get("b"), Some(&CellValue::from_text("2")));
        assert_eq!(record.get_or_empty("missing"), &CellValue::Empty);
    }

    #[test]
    fn test_record_from_json_keeps_key_order() {
        let record = Record::from_json(&json!({"zeta": 1, "alpha": "a", "mid": null})).unwrap();
        assert_eq!(
            record.columns().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mid"]
        );
        assert!(record.get("mid").unwrap().is_empty());
    }

    #[test]
    fn test_record_from_json_rejects_non_object() {
        let err = Record::from_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, InsightError::Source { .. }));
    }

    #[test]
    fn test_table_shape() {
        let table: Table = vec![
            Record::new().with("id", "1").with("name", "a"),
            Record::new().with("id", "2").with("name", "b"),
        ]
        .into();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.columns(), vec!["id", "name"]);
    }

    #[test]
    fn test_check_schema_accepts_reordered_keys() {
        let table = Table::new(vec![
            Record::new().with("id", "1").with("name", "a"),
            Record::new().with("name", "b").with("id", "2"),
        ]);
        assert!(table.check_schema().is_ok());
    }

    #[test]
    fn test_check_schema_reports_first_divergent_row() {
        let table = Table::new(vec![
            Record::new().with("id", "1").with("name", "a"),
            Record::new().with("id", "2").with("name", "b"),
            Record::new().with("id", "3").with("email", "c@d"),
        ]);
        match table.check_schema().unwrap_err() {
            InsightError::SchemaInconsistency {
                row,
                missing,
                unexpected,
            } => {
                assert_eq!(row, 2);
                assert_eq!(missing, vec!["name".to_string()]);
                assert_eq!(unexpected, vec!["email".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_schema_empty_table() {
        assert!(matches!(
            Table::default().check_schema(),
            Err(InsightError::EmptyInput)
        ));
    }

    #[test]
    fn test_table_serializes_as_array_of_objects() {
        let table = Table::new(vec![Record::new().with("x", "1").with("y", None::<&str>)]);
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!([{"x": "1", "y": ""}])
        );
    }
}
