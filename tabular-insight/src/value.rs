//! Tagged cell values.
//!
//! A raw cell arrives as text, a JSON number, or nothing at all. It is
//! classified once, when the record is built, into a [`CellValue`]; every
//! later stage pattern-matches on the tag instead of re-testing the raw form.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Strict numeric literal: optional leading minus, digits, at most one decimal
/// point, at least one digit after it. ASCII digits only.
static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^-?[0-9]*\.?[0-9]+$").expect("Hard-coded regex pattern should be valid")
});

/// Returns true if `text` is a strict numeric literal.
///
/// Accepts `"42"`, `"-3.5"`, `".5"`; rejects `"5."`, `"+1"`, `"1e3"`, `" 1"`.
pub fn is_numeric_literal(text: &str) -> bool {
    NUMERIC_LITERAL.is_match(text)
}

/// Shared empty cell handed out for absent keys.
pub(crate) static ABSENT: CellValue = CellValue::Empty;

/// A single cell, classified at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CellValue {
    /// Null, absent, or the exact empty string. Whitespace is not empty.
    #[default]
    Empty,
    /// Text matching the strict numeric literal pattern.
    NumericText(String),
    /// Any other non-empty text.
    Text(String),
}

impl CellValue {
    /// Classifies raw text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::Empty
        } else if is_numeric_literal(&text) {
            Self::NumericText(text)
        } else {
            Self::Text(text)
        }
    }

    /// Classifies a JSON value as the parsing collaborator would hand it over.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::String(s) => Self::from_text(s.as_str()),
            Value::Number(n) => Self::from_text(n.to_string()),
            Value::Bool(b) => Self::Text(b.to_string()),
            other => Self::Text(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The cell's text, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::NumericText(s) | Self::Text(s) => Some(s),
        }
    }

    /// Parses the cell as a finite float.
    ///
    /// Only `NumericText` participates. Overflowing literals parse to
    /// infinity in Rust and are discarded here.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::NumericText(s) => s.parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or(""))
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        Self::from_text(text)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

// Cells serialize as the text the parser produced; `Empty` becomes "".
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str().unwrap_or(""))
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_literal_pattern() {
        for ok in ["0", "42", "-7", "3.14", "-0.5", ".5", "-.5", "007"] {
            assert!(is_numeric_literal(ok), "expected numeric: {ok}");
        }
        for bad in ["", "-", ".", "5.", "+1", "1e3", " 1", "1 ", "1.2.3", "abc", "١٢"] {
            assert!(!is_numeric_literal(bad), "expected non-numeric: {bad}");
        }
    }

    #[test]
    fn test_from_text_classification() {
        assert_eq!(CellValue::from_text(""), CellValue::Empty);
        assert_eq!(
            CellValue::from_text("12.5"),
            CellValue::NumericText("12.5".to_string())
        );
        assert_eq!(CellValue::from_text(" "), CellValue::Text(" ".to_string()));
        assert_eq!(CellValue::from_text("0"), CellValue::NumericText("0".to_string()));
    }

    #[test]
    fn test_from_json_classification() {
        assert_eq!(CellValue::from_json(&json!(null)), CellValue::Empty);
        assert_eq!(CellValue::from_json(&json!("")), CellValue::Empty);
        assert_eq!(
            CellValue::from_json(&json!(-4)),
            CellValue::NumericText("-4".to_string())
        );
        assert_eq!(
            CellValue::from_json(&json!(2.5)),
            CellValue::NumericText("2.5".to_string())
        );
        assert_eq!(
            CellValue::from_json(&json!(true)),
            CellValue::Text("true".to_string())
        );
    }

    #[test]
    fn test_as_f64_is_defensive() {
        assert_eq!(CellValue::from_text("-.5").as_f64(), Some(-0.5));
        assert_eq!(CellValue::Text("abc".to_string()).as_f64(), None);
        assert_eq!(CellValue::Empty.as_f64(), None);
        // Constructed directly, bypassing classification.
        assert_eq!(CellValue::NumericText("-".to_string()).as_f64(), None);
        assert_eq!(CellValue::NumericText(".".to_string()).as_f64(), None);
        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(CellValue::from_text(huge).as_f64(), None);
    }

    #[test]
    fn test_serde_uses_source_text() {
        let cell = CellValue::from_text("3.0");
        assert_eq!(serde_json::to_string(&cell).unwrap(), "\"3.0\"");
        assert_eq!(serde_json::to_string(&CellValue::Empty).unwrap(), "\"\"");
        let back: CellValue = serde_json::from_str("7").unwrap();
        assert_eq!(back, CellValue::NumericText("7".to_string()));
    }
}
