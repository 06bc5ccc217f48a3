//! Error types for tabular-insight.
//!
//! Only two conditions abort a profiling run: an empty table and a table whose
//! records disagree on their column set. Everything that goes wrong inside a
//! single column (no usable values, unparsable numbers, a lone category) is
//! resolved by that column's sentinel summary and never reaches this enum.
//! The remaining variants belong to the ingestion and formatting layers.

use thiserror::Error;

/// The main error type for tabular-insight.
#[derive(Error, Debug)]
pub enum InsightError {
    /// The table has zero records.
    #[error("Input table is empty: at least one record is required")]
    EmptyInput,

    /// A record's key set diverges from the schema defined by the first record.
    #[error(
        "Schema inconsistency at row {row}: missing columns {missing:?}, unexpected columns {unexpected:?}"
    )]
    SchemaInconsistency {
        /// Zero-based index of the offending record
        row: usize,
        /// Schema columns the record does not carry
        missing: Vec<String>,
        /// Columns the record carries that the schema does not know
        unexpected: Vec<String>,
    },

    /// Error from a data source (CSV reader, JSON loader).
    #[error("Data source error ({source_type}): {message}")]
    Source {
        /// Type of data source (e.g., "CSV", "JSON")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Reader options that contradict each other.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, InsightError>`.
pub type Result<T> = std::result::Result<T, InsightError>;

impl InsightError {
    /// Creates a new data source error.
    pub fn source_error(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data source error with a source error.
    pub fn source_error_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Source {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Returns true for the errors a caller should present as
    /// "file is empty or malformed".
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::SchemaInconsistency { .. }
        )
    }
}

impl From<serde_json::Error> for InsightError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<csv::Error> for InsightError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        Self::source_error_with_source("CSV", message, Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_empty_input_message() {
        let err = InsightError::EmptyInput;
        assert_eq!(
            err.to_string(),
            "Input table is empty: at least one record is required"
        );
        assert!(err.is_input_error());
    }

    #[test]
    fn test_schema_inconsistency_message() {
        let err = InsightError::SchemaInconsistency {
            row: 3,
            missing: vec!["age".to_string()],
            unexpected: vec![],
        };
        let message = err.to_string();
        assert!(message.contains("row 3"));
        assert!(message.contains("\"age\""));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_source_error_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err = InsightError::source_error_with_source("CSV", "Could not open", Box::new(io));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Data source error (CSV): Could not open");
        assert!(!err.is_input_error());
    }
}
