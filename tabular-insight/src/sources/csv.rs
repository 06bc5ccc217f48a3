//! CSV source implementation.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, instrument};

use super::TableSource;
use crate::error::{InsightError, Result};
use crate::log_data_op;
use crate::logging::LogConfig;
use crate::table::{Record, Table};
use crate::value::CellValue;

/// Options for configuring CSV reading.
///
/// A header row is always required: its names become the record keys.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Comment prefix (lines starting with this are ignored)
    pub comment: Option<u8>,
    /// Allow rows whose field count differs from the header (default: true)
    pub flexible: bool,
    /// Drop rows whose fields are all empty, e.g. `,,` (default: true).
    /// Lines with no content at all are always skipped.
    pub skip_empty_lines: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            comment: None,
            flexible: true,
            skip_empty_lines: true,
        }
    }
}

impl CsvOptions {
    /// Tab-separated values.
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }

    /// Rejects option combinations the reader cannot disambiguate.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == self.quote {
            return Err(InsightError::Configuration(format!(
                "CSV delimiter and quote are both {:?}",
                char::from(self.delimiter)
            )));
        }
        if let Some(comment) = self.comment {
            if comment == self.delimiter || comment == self.quote {
                return Err(InsightError::Configuration(format!(
                    "CSV comment prefix {:?} collides with the delimiter or quote",
                    char::from(comment)
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum CsvInput {
    Path(PathBuf),
    Text(String),
}

/// A CSV data source backed by a file or an in-memory string.
///
/// Rows shorter than the header produce records without the trailing keys;
/// pair this with lenient schema mode for ragged files. Rows longer than
/// the header are rejected.
///
/// # Examples
///
/// ```rust,no_run
/// use tabular_insight::sources::{CsvOptions, CsvSource, TableSource};
///
/// let table = CsvSource::with_options("data/sales.tsv", CsvOptions::tsv())
///     .load()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    input: CsvInput,
    options: CsvOptions,
    log: LogConfig,
}

impl CsvSource {
    /// Creates a new CSV source from a file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, CsvOptions::default())
    }

    /// Creates a new CSV source with custom options.
    pub fn with_options(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            input: CsvInput::Path(path.into()),
            options,
            log: LogConfig::default(),
        }
    }

    /// Creates a CSV source over in-memory text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: CsvInput::Text(text.into()),
            options: CsvOptions::default(),
            log: LogConfig::default(),
        }
    }

    /// Sets custom options for this CSV source.
    pub fn with_custom_options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Reads a table from any reader using `options`.
    pub fn read_from<R: Read>(reader: R, options: &CsvOptions) -> Result<Table> {
        options.validate()?;

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(options.delimiter)
            .quote(options.quote)
            .comment(options.comment)
            .flexible(options.flexible)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        check_headers(&headers)?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (line, row) in csv_reader.records().enumerate() {
            let row = row?;
            if options.skip_empty_lines && row.iter().all(str::is_empty) {
                skipped += 1;
                continue;
            }
            if row.len() > headers.len() {
                return Err(InsightError::source_error(
                    "CSV",
                    format!(
                        "record {} has {} fields but the header has {}",
                        line + 1,
                        row.len(),
                        headers.len()
                    ),
                ));
            }
            records.push(to_record(&headers, &row));
        }

        debug!(
            rows = records.len(),
            columns = headers.len(),
            skipped,
            "Parsed CSV input"
        );
        Ok(Table::new(records))
    }
}

impl TableSource for CsvSource {
    #[instrument(skip(self), fields(source = %self.description()))]
    fn load(&self) -> Result<Table> {
        let table = match &self.input {
            CsvInput::Path(path) => {
                let file = File::open(path).map_err(|e| {
                    InsightError::source_error_with_source(
                        "CSV",
                        format!("failed to open {}", path.display()),
                        Box::new(e),
                    )
                })?;
                Self::read_from(file, &self.options)?
            }
            CsvInput::Text(text) => Self::read_from(text.as_bytes(), &self.options)?,
        };

        log_data_op!(
            self.log,
            rows = table.row_count(),
            columns = table.column_count(),
            "Loaded CSV source"
        );
        Ok(table)
    }

    fn description(&self) -> String {
        match &self.input {
            CsvInput::Path(path) => format!("CSV file: {}", path.display()),
            CsvInput::Text(text) => format!("CSV text ({} bytes)", text.len()),
        }
    }
}

fn check_headers(headers: &StringRecord) -> Result<()> {
    let mut seen = HashSet::new();
    for name in headers.iter() {
        if !seen.insert(name) {
            return Err(InsightError::source_error(
                "CSV",
                format!("duplicate column name {name:?} in header"),
            ));
        }
    }
    Ok(())
}

/// Pairs header names with fields. Missing trailing fields stay absent.
fn to_record(headers: &StringRecord, row: &StringRecord) -> Record {
    headers
        .iter()
        .zip(row.iter())
        .map(|(name, field)| (name, CellValue::from_text(field)))
        .collect()
}
