//! Profiling scenarios over the shared test fixtures.

use tabular_insight::formatters::{FormatterConfig, MarkdownFormatter, ReportFormatter};
use tabular_insight::prelude::*;
use tabular_insight::sources::{CsvSource, TableSource};
use tabular_insight::test_fixtures::{
    all_empty_column_table, near_numeric_table, ragged_table, sales_table, synthetic_table,
    SALES_CSV,
};

#[test]
fn test_sales_table_profile() {
    let report = profile(&sales_table()).unwrap();

    assert_eq!(report.shape.rows, 6);
    assert_eq!(report.numeric_columns(), vec!["revenue", "units"]);
    assert_eq!(report.categorical_columns(), vec!["region", "campaign"]);

    let missing: Vec<_> = report
        .missing_values
        .iter()
        .map(|e| (e.column.as_str(), e.missing_count))
        .collect();
    assert_eq!(missing, vec![("revenue", 1), ("units", 1), ("campaign", 3)]);

    let revenue = &report.numeric_summary.as_ref().unwrap()[0];
    assert_eq!(revenue.count, 5);
    assert_eq!(revenue.mean, Some(131.15));
    assert_eq!(revenue.min, Some(45.25));
    assert_eq!(revenue.max, Some(310.0));

    let campaign = &report.categorical_summary.as_ref().unwrap()[1];
    assert_eq!(campaign.count, 3);
    assert_eq!(campaign.mode.as_deref(), Some("promo"));
}

#[test]
fn test_csv_and_in_memory_fixture_agree() {
    let from_csv = CsvSource::from_text(SALES_CSV).load().unwrap();
    assert_eq!(from_csv, sales_table());
    assert_eq!(profile(&from_csv).unwrap(), profile(&sales_table()).unwrap());
}

#[test]
fn test_near_numeric_values_are_categorical() {
    let report = profile(&near_numeric_table()).unwrap();
    assert_eq!(report.column_type("value"), Some(ColumnType::Categorical));
    assert_eq!(report.column_type("id"), Some(ColumnType::Numeric));

    let value = &report.categorical_summary.unwrap()[0];
    assert_eq!(value.unique, 6);
    assert_eq!(value.mode.as_deref(), Some("1e3"));
}

#[test]
fn test_ragged_fixture_by_schema_mode() {
    let table = ragged_table();
    match profile(&table) {
        Err(InsightError::SchemaInconsistency { row, missing, .. }) => {
            assert_eq!(row, 1);
            assert_eq!(missing, vec!["b".to_string()]);
        }
        other => panic!("expected schema error, got {other:?}"),
    }

    let report = Profiler::builder()
        .schema_mode(SchemaMode::Lenient)
        .build()
        .profile(&table)
        .unwrap();
    assert_eq!(report.shape.cols, 2);
}

#[test]
fn test_all_empty_column_renders_unavailable() {
    let report = profile(&all_empty_column_table(4)).unwrap();
    let markdown = MarkdownFormatter::with_config(FormatterConfig::minimal())
        .format(&report)
        .unwrap();
    assert!(markdown.contains("| blank | 0 | N/A | N/A | N/A | N/A |"));
}

#[test]
fn test_synthetic_table_shape() {
    let table = synthetic_table(250, 6);
    let report = profile(&table).unwrap();
    assert_eq!(report.shape.rows, 250);
    assert_eq!(report.numeric_columns(), vec!["c0", "c2", "c4"]);
    assert_eq!(report.categorical_columns(), vec!["c1", "c3", "c5"]);
    assert_eq!(report.missing_values.len(), 6);
}
