//! Report formatting for display collaborators.
//!
//! This module renders an [`InsightReport`] as JSON for programmatic
//! consumers, as human-readable console text, or as Markdown for documents.
//! Formatters only read the report; timestamps are added here, never by the
//! profiler, so the report itself stays deterministic.
//!
//! # Examples
//!
//! ```rust
//! use tabular_insight::formatters::{HumanFormatter, ReportFormatter};
//! use tabular_insight::prelude::*;
//!
//! let table: Table = vec![Record::new().with("score", "7")].into();
//! let report = profile(&table).unwrap();
//!
//! let output = HumanFormatter::new().format(&report).unwrap();
//! assert!(output.contains("Rows: 1"));
//! ```

use std::fmt::Write;

use chrono::Utc;
use serde_json::Value;

use crate::error::{InsightError, Result};
use crate::report::InsightReport;
use crate::table::Record;

/// Marker printed for statistics of a column with no usable values.
pub const UNAVAILABLE_MARKER: &str = "N/A";

/// Configuration options for formatting insight reports.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include the preview rows
    pub include_preview: bool,
    /// Include chart aggregates
    pub include_charts: bool,
    /// Maximum number of preview rows to display (-1 for all carried rows)
    pub max_preview_rows: i32,
    /// Whether to use colorized output (for human formatter)
    pub use_colors: bool,
    /// Whether to include a generation timestamp in output
    pub include_timestamps: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_preview: true,
            include_charts: true,
            max_preview_rows: -1,
            use_colors: true,
            include_timestamps: true,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration showing only shape and summaries.
    pub fn minimal() -> Self {
        Self {
            include_preview: false,
            include_charts: false,
            max_preview_rows: 0,
            use_colors: false,
            include_timestamps: false,
        }
    }

    /// Creates a detailed configuration showing everything.
    pub fn detailed() -> Self {
        Self::default()
    }

    /// Creates a configuration suitable for CI logs and snapshots.
    pub fn ci() -> Self {
        Self {
            include_preview: true,
            include_charts: false,
            max_preview_rows: 5,
            use_colors: false,
            include_timestamps: false,
        }
    }

    pub fn with_preview(mut self, include: bool) -> Self {
        self.include_preview = include;
        self
    }

    pub fn with_charts(mut self, include: bool) -> Self {
        self.include_charts = include;
        self
    }

    /// Sets the maximum number of preview rows to display.
    pub fn with_max_preview_rows(mut self, max: i32) -> Self {
        self.max_preview_rows = max;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }

    fn preview_rows<'a>(&self, report: &'a InsightReport) -> &'a [Record] {
        if self.max_preview_rows < 0 {
            &report.preview
        } else {
            let max = self.max_preview_rows as usize;
            &report.preview[..max.min(report.preview.len())]
        }
    }
}

/// Trait for rendering insight reports into different output formats.
///
/// # Examples
///
/// ```rust
/// use tabular_insight::formatters::ReportFormatter;
/// use tabular_insight::report::InsightReport;
///
/// struct ShapeOnly;
///
/// impl ReportFormatter for ShapeOnly {
///     fn format(&self, report: &InsightReport) -> tabular_insight::Result<String> {
///         Ok(format!("{}x{}", report.shape.rows, report.shape.cols))
///     }
/// }
/// ```
pub trait ReportFormatter {
    /// Formats a report into a string representation.
    fn format(&self, report: &InsightReport) -> Result<String>;

    /// Formats a report with custom configuration.
    ///
    /// The default implementation ignores `config`.
    fn format_with_config(
        &self,
        report: &InsightReport,
        _config: &FormatterConfig,
    ) -> Result<String> {
        self.format(report)
    }
}

/// Formats reports as structured JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &InsightReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &InsightReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let filtered = filter_report_for_config(report, config)?;

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&filtered)
        } else {
            serde_json::to_string(&filtered)
        };
        rendered.map_err(|e| {
            InsightError::Serialization(format!("Failed to serialize report to JSON: {e}"))
        })
    }
}

/// Formats reports for console output.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &InsightReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &InsightReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        write_human(&mut output, report, config).map_err(render_error)?;
        Ok(output)
    }
}

fn write_human(
    out: &mut String,
    report: &InsightReport,
    config: &FormatterConfig,
) -> std::fmt::Result {
    let bold = |text: &str| {
        if config.use_colors {
            format!("\x1b[1m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    };

    writeln!(out)?;
    writeln!(out, "📊 {}", bold("Dataset Insight"))?;
    if config.include_timestamps {
        writeln!(out, "Generated: {}", Utc::now().to_rfc3339())?;
    }
    writeln!(out)?;
    writeln!(out, "   Rows: {}", report.shape.rows)?;
    writeln!(out, "   Columns: {}", report.shape.cols)?;

    writeln!(out)?;
    writeln!(out, "🔤 {}", bold("Column Types:"))?;
    for entry in &report.column_types {
        writeln!(out, "   {}: {}", entry.column, entry.data_type)?;
    }

    writeln!(out)?;
    writeln!(out, "🕳️  {}", bold("Missing Values:"))?;
    if report.missing_values.is_empty() {
        writeln!(out, "   None")?;
    } else {
        for entry in &report.missing_values {
            let count = if config.use_colors {
                format!("\x1b[33m{}\x1b[0m", entry.missing_count)
            } else {
                entry.missing_count.to_string()
            };
            writeln!(out, "   {}: {count}", entry.column)?;
        }
    }

    if let Some(rows) = &report.numeric_summary {
        writeln!(out)?;
        writeln!(out, "🔢 {}", bold("Numeric Summary:"))?;
        for row in rows {
            writeln!(
                out,
                "   {}: count={} mean={} std={} min={} max={}",
                row.column,
                row.count,
                stat(row.mean),
                stat(row.std),
                stat(row.min),
                stat(row.max)
            )?;
        }
    }

    if let Some(rows) = &report.categorical_summary {
        writeln!(out)?;
        writeln!(out, "🏷️  {}", bold("Categorical Summary:"))?;
        for row in rows {
            writeln!(
                out,
                "   {}: count={} unique={} mode={} freq={}",
                row.column,
                row.count,
                row.unique,
                row.mode.as_deref().unwrap_or(UNAVAILABLE_MARKER),
                count_or_marker(row.mode_frequency)
            )?;
        }
    }

    if config.include_preview {
        let rows = config.preview_rows(report);
        writeln!(out)?;
        writeln!(out, "👀 {}", bold("Preview:"))?;
        let header: Vec<&str> = report.column_types.iter().map(|e| e.column.as_str()).collect();
        writeln!(out, "   {}", header.join(" | "))?;
        for record in rows {
            let cells: Vec<String> = header
                .iter()
                .map(|column| record.get_or_empty(column).to_string())
                .collect();
            writeln!(out, "   {}", cells.join(" | "))?;
        }
        if report.preview.len() > rows.len() {
            writeln!(
                out,
                "   ... and {} more preview rows",
                report.preview.len() - rows.len()
            )?;
        }
    }

    if config.include_charts {
        writeln!(out)?;
        writeln!(out, "📈 {}", bold("Type Distribution:"))?;
        for bucket in &report.charts.type_distribution {
            writeln!(
                out,
                "   {:<12} {} {}",
                bucket.data_type.type_name(),
                "█".repeat(bucket.count),
                bucket.count
            )?;
        }
    }

    writeln!(out)?;
    Ok(())
}

/// Formats reports as Markdown suitable for documentation.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the base heading level for the output.
    ///
    /// Sections sit one level below the title, so the title stops at 5.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 5);
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &InsightReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &InsightReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        write_markdown(&mut output, report, config, self.heading_level).map_err(render_error)?;
        Ok(output)
    }
}

fn write_markdown(
    out: &mut String,
    report: &InsightReport,
    config: &FormatterConfig,
    heading_level: u8,
) -> std::fmt::Result {
    let h = "#".repeat(heading_level as usize);

    writeln!(out, "{h} Dataset Insight Report")?;
    writeln!(out)?;
    writeln!(
        out,
        "**Rows:** {} | **Columns:** {}",
        report.shape.rows, report.shape.cols
    )?;
    if config.include_timestamps {
        writeln!(out, "**Generated:** {}", Utc::now().to_rfc3339())?;
    }

    writeln!(out)?;
    writeln!(out, "{h}# Column Types")?;
    writeln!(out)?;
    writeln!(out, "| Column | Type |")?;
    writeln!(out, "|--------|------|")?;
    for entry in &report.column_types {
        writeln!(out, "| {} | {} |", escape_cell(&entry.column), entry.data_type)?;
    }

    writeln!(out)?;
    writeln!(out, "{h}# Missing Values")?;
    writeln!(out)?;
    if report.missing_values.is_empty() {
        writeln!(out, "No missing values.")?;
    } else {
        writeln!(out, "| Column | Missing |")?;
        writeln!(out, "|--------|---------|")?;
        for entry in &report.missing_values {
            writeln!(out, "| {} | {} |", escape_cell(&entry.column), entry.missing_count)?;
        }
    }

    if let Some(rows) = &report.numeric_summary {
        writeln!(out)?;
        writeln!(out, "{h}# Numeric Summary")?;
        writeln!(out)?;
        writeln!(out, "| Column | Count | Mean | Std | Min | Max |")?;
        writeln!(out, "|--------|-------|------|-----|-----|-----|")?;
        for row in rows {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                escape_cell(&row.column),
                row.count,
                stat(row.mean),
                stat(row.std),
                stat(row.min),
                stat(row.max)
            )?;
        }
    }

    if let Some(rows) = &report.categorical_summary {
        writeln!(out)?;
        writeln!(out, "{h}# Categorical Summary")?;
        writeln!(out)?;
        writeln!(out, "| Column | Count | Unique | Mode | Frequency |")?;
        writeln!(out, "|--------|-------|--------|------|-----------|")?;
        for row in rows {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                escape_cell(&row.column),
                row.count,
                row.unique,
                escape_cell(row.mode.as_deref().unwrap_or(UNAVAILABLE_MARKER)),
                count_or_marker(row.mode_frequency)
            )?;
        }
    }

    if config.include_preview && !report.preview.is_empty() {
        let rows = config.preview_rows(report);
        let header: Vec<&str> = report.column_types.iter().map(|e| e.column.as_str()).collect();

        writeln!(out)?;
        writeln!(out, "{h}# Preview")?;
        writeln!(out)?;
        let escaped: Vec<String> = header.iter().map(|c| escape_cell(c)).collect();
        writeln!(out, "| {} |", escaped.join(" | "))?;
        writeln!(out, "|{}", "---|".repeat(header.len()))?;
        for record in rows {
            let cells: Vec<String> = header
                .iter()
                .map(|column| escape_cell(&record.get_or_empty(column).to_string()))
                .collect();
            writeln!(out, "| {} |", cells.join(" | "))?;
        }
        if report.preview.len() > rows.len() {
            writeln!(out)?;
            writeln!(
                out,
                "> **Note:** {} additional preview rows not shown.",
                report.preview.len() - rows.len()
            )?;
        }
    }

    if config.include_charts {
        writeln!(out)?;
        writeln!(out, "{h}# Type Distribution")?;
        writeln!(out)?;
        for bucket in &report.charts.type_distribution {
            writeln!(out, "- **{}:** {}", bucket.data_type, bucket.count)?;
        }
    }

    Ok(())
}

/// Serializes the report and drops the sections `config` excludes.
fn filter_report_for_config(report: &InsightReport, config: &FormatterConfig) -> Result<Value> {
    let mut value = serde_json::to_value(report)?;

    if let Value::Object(map) = &mut value {
        if config.include_preview {
            let rows = config.preview_rows(report);
            map.insert("preview".to_string(), serde_json::to_value(rows)?);
        } else {
            map.remove("preview");
        }
        if !config.include_charts {
            map.remove("charts");
        }
        if config.include_timestamps {
            map.insert(
                "generated_at".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
        }
    }

    Ok(value)
}

fn stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => UNAVAILABLE_MARKER.to_string(),
    }
}

fn count_or_marker(value: Option<usize>) -> String {
    value.map_or_else(|| UNAVAILABLE_MARKER.to_string(), |v| v.to_string())
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn render_error(e: std::fmt::Error) -> InsightError {
    InsightError::Internal(format!("Failed to render report: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::profile;
    use crate::table::{Record, Table};

    fn create_test_report() -> InsightReport {
        let table: Table = vec![
            Record::new().with("region", "north").with("sales", "10.5").with("notes", ""),
            Record::new().with("region", "south").with("sales", "").with("notes", ""),
            Record::new().with("region", "north").with("sales", "7").with("notes", ""),
        ]
        .into();
        profile(&table).unwrap()
    }

    #[test]
    fn test_formatter_config() {
        let config = FormatterConfig::default();
        assert!(config.include_preview);
        assert!(config.include_charts);
        assert!(config.use_colors);

        let minimal = FormatterConfig::minimal();
        assert!(!minimal.include_preview);
        assert!(!minimal.use_colors);

        let ci = FormatterConfig::ci();
        assert!(!ci.include_timestamps);
        assert_eq!(ci.max_preview_rows, 5);
    }

    #[test]
    fn test_json_formatter() {
        let report = create_test_report();
        let formatter = JsonFormatter::with_config(FormatterConfig::ci()).with_pretty(false);

        let output = formatter.format(&report).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["shape"]["rows"], 3);
        assert_eq!(parsed["column_types"][1]["data_type"], "Numeric");
        assert!(parsed.get("charts").is_none());
        assert!(parsed.get("generated_at").is_none());

        let output = formatter
            .format_with_config(&report, &FormatterConfig::default())
            .unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert!(parsed.get("generated_at").is_some());
        assert!(parsed.get("charts").is_some());
    }

    #[test]
    fn test_json_sentinel_statistics_are_null() {
        let report = create_test_report();
        let output = JsonFormatter::with_config(FormatterConfig::minimal())
            .format(&report)
            .unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        let numeric = parsed["numeric_summary"].as_array().unwrap();
        let notes = numeric.iter().find(|row| row["column"] == "notes").unwrap();
        assert_eq!(notes["count"], 0);
        assert!(notes["mean"].is_null());
    }

    #[test]
    fn test_human_formatter() {
        let report = create_test_report();
        let formatter = HumanFormatter::new();

        let output = formatter.format(&report).unwrap();
        assert!(output.contains("Rows: 3"));
        assert!(output.contains("sales: Numeric"));
        assert!(output.contains("mean=8.75"));
        assert!(output.contains("mode=north freq=2"));

        let config = FormatterConfig::default().with_colors(false);
        let output = formatter.format_with_config(&report, &config).unwrap();
        assert!(!output.contains("\x1b["));
        assert!(output.contains("notes: count=0 mean=N/A std=N/A min=N/A max=N/A"));
    }

    #[test]
    fn test_markdown_formatter() {
        let report = create_test_report();
        let formatter = MarkdownFormatter::new();

        let output = formatter.format(&report).unwrap();
        assert!(output.contains("## Dataset Insight Report"));
        assert!(output.contains("| sales | Numeric |"));
        assert!(output.contains("| notes | 0 | N/A | N/A | N/A | N/A |"));
        assert!(output.contains("| region | 3 | 2 | north | 2 |"));

        let formatter = MarkdownFormatter::new().with_heading_level(9);
        let output = formatter.format(&report).unwrap();
        assert!(output.starts_with("##### Dataset Insight Report"));
    }

    #[test]
    fn test_markdown_headings_stay_within_six_levels() {
        let report = create_test_report();
        for level in [5, 6, u8::MAX] {
            let output = MarkdownFormatter::new()
                .with_heading_level(level)
                .format(&report)
                .unwrap();
            assert!(output.lines().any(|line| line.starts_with("###### ")));
            assert!(!output.lines().any(|line| line.starts_with("#######")));
        }
    }

    #[test]
    fn test_config_max_preview_rows() {
        let report = create_test_report();
        let config = FormatterConfig::default()
            .with_colors(false)
            .with_max_preview_rows(1);

        let output = HumanFormatter::new()
            .format_with_config(&report, &config)
            .unwrap();
        assert!(output.contains("north | 10.5 | "));
        assert!(output.contains("... and 2 more preview rows"));
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let table: Table = vec![Record::new().with("a|b", "x|y")].into();
        let report = profile(&table).unwrap();
        let output = MarkdownFormatter::with_config(FormatterConfig::minimal())
            .format(&report)
            .unwrap();
        assert!(output.contains("a\\|b"));
    }
}
