//! JSON source: an array of flat objects, one per row.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::instrument;

use super::TableSource;
use crate::error::{InsightError, Result};
use crate::log_data_op;
use crate::logging::LogConfig;
use crate::table::Table;

/// Builds a table from an already-parsed JSON array of objects.
///
/// Object key order is preserved. `null` cells are missing; numbers and
/// booleans are classified from their JSON text.
pub fn table_from_json(value: &Value) -> Result<Table> {
    Table::from_json(value)
}

#[derive(Debug, Clone)]
enum JsonInput {
    Path(PathBuf),
    Text(String),
}

/// A JSON document backed by a file or an in-memory string.
#[derive(Debug, Clone)]
pub struct JsonSource {
    input: JsonInput,
    log: LogConfig,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            input: JsonInput::Path(path.into()),
            log: LogConfig::default(),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: JsonInput::Text(text.into()),
            log: LogConfig::default(),
        }
    }

    pub fn with_log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    fn read_text(&self) -> Result<String> {
        match &self.input {
            JsonInput::Text(text) => Ok(text.clone()),
            JsonInput::Path(path) => fs::read_to_string(path).map_err(|e| {
                InsightError::source_error_with_source(
                    "JSON",
                    format!("failed to read {}", path.display()),
                    Box::new(e),
                )
            }),
        }
    }
}

impl TableSource for JsonSource {
    #[instrument(skip(self), fields(source = %self.description()))]
    fn load(&self) -> Result<Table> {
        let text = self.read_text()?;
        let value: Value = serde_json::from_str(&text).map_err(|e| {
            InsightError::source_error_with_source("JSON", "invalid JSON document", Box::new(e))
        })?;
        let table = table_from_json(&value)?;

        log_data_op!(
            self.log,
            rows = table.row_count(),
            columns = table.column_count(),
            "Loaded JSON source"
        );
        Ok(table)
    }

    fn description(&self) -> String {
        match &self.input {
            JsonInput::Path(path) => format!("JSON file: {}", path.display()),
            JsonInput::Text(text) => format!("JSON text ({} bytes)", text.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::value::CellValue;

    #[test]
    fn test_table_from_json_array() {
        let table = table_from_json(&json!([
            {"id": 1, "tag": "x", "note": null},
            {"id": 2.5, "tag": true, "note": ""}
        ]))
        .unwrap();

        assert_eq!(table.columns(), vec!["id", "tag", "note"]);
        let second = &table.records()[1];
        assert_eq!(second.get("id"), Some(&CellValue::NumericText("2.5".into())));
        assert_eq!(second.get("tag"), Some(&CellValue::Text("true".into())));
        assert_eq!(table.records()[0].get("note"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_json_source_from_text() {
        let table = JsonSource::from_text(r#"[{"a": "1"}, {"a": "b"}]"#)
            .load()
            .unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_invalid_documents_are_source_errors() {
        for text in ["not json", r#"{"a": 1}"#, r#"[1, 2]"#] {
            let err = JsonSource::from_text(text).load().unwrap_err();
            assert!(
                matches!(err, InsightError::Source { .. }),
                "{text} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_empty_array_loads_as_empty_table() {
        let table = JsonSource::from_text("[]").load().unwrap();
        assert!(table.is_empty());
    }
}
