//! Profiles a CSV or JSON file and prints the report.
//!
//! Usage: `profile-file-demo [path] [human|markdown|json]`

use std::path::Path;

use anyhow::{bail, Result};
use tabular_insight::background::profile_in_background;
use tabular_insight::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ReportFormatter,
};
use tabular_insight::logging::setup::{init_logging, LoggingConfig};
use tabular_insight::prelude::*;
use tabular_insight::sources::{CsvOptions, CsvSource, JsonSource, TableSource};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(LoggingConfig::default()).map_err(|e| anyhow::anyhow!("{e}"))?;

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "data/customers.csv".to_string());
    let format = args.next().unwrap_or_else(|| "human".to_string());

    let extension = Path::new(&path).extension().and_then(|e| e.to_str());
    let source: Box<dyn TableSource> = match extension {
        Some("json") => Box::new(JsonSource::new(&path)),
        Some("tsv") => Box::new(CsvSource::with_options(&path, CsvOptions::tsv())),
        _ => Box::new(CsvSource::new(&path)),
    };
    println!("Loading {}...", source.description());
    let table = source.load()?;

    let profiler = Profiler::builder()
        .schema_mode(SchemaMode::Lenient)
        .build();

    let report = match profile_in_background(profiler, table).await {
        Ok(report) => report,
        Err(e) if e.is_input_error() => bail!("The file is empty or malformed: {e}"),
        Err(e) => return Err(e.into()),
    };

    let config = FormatterConfig::default();
    let output = match format.as_str() {
        "json" => JsonFormatter::with_config(config).format(&report)?,
        "markdown" => MarkdownFormatter::with_config(config).format(&report)?,
        _ => HumanFormatter::with_config(config).format(&report)?,
    };
    println!("{output}");

    let name = Path::new(&path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(&path);
    println!("{}", report.narration_summary(name));

    Ok(())
}
