//! Common tables for profiling tests and benchmarks.
//!
//! Available to integration tests and downstream crates through the
//! `test-utils` feature.

use crate::table::{Record, Table};

/// Small retail table: one categorical, two numeric and one sparse column.
pub fn sales_table() -> Table {
    let rows = [
        ("north", "120.5", "3", "promo"),
        ("south", "80", "1", ""),
        ("north", "99.99", "2", ""),
        ("east", "", "5", "clearance"),
        ("south", "45.25", "", ""),
        ("north", "310", "7", "promo"),
    ];
    rows.iter()
        .map(|(region, revenue, units, campaign)| {
            Record::new()
                .with("region", *region)
                .with("revenue", *revenue)
                .with("units", *units)
                .with("campaign", *campaign)
        })
        .collect()
}

/// Values that look almost numeric; every column is categorical.
pub fn near_numeric_table() -> Table {
    ["1e3", "+5", "5.", " 7", "1,000", "0x1F"]
        .iter()
        .map(|v| Record::new().with("value", *v).with("id", "1"))
        .collect()
}

/// Records whose key sets disagree with the first record's.
pub fn ragged_table() -> Table {
    vec![
        Record::new().with("a", "1").with("b", "x"),
        Record::new().with("a", "2"),
        Record::new().with("a", "3").with("b", "y").with("c", "extra"),
    ]
    .into()
}

/// A table with one column where every value is empty.
pub fn all_empty_column_table(rows: usize) -> Table {
    (0..rows)
        .map(|i| Record::new().with("id", i.to_string()).with("blank", ""))
        .collect()
}

/// Deterministic synthetic table of `rows` rows.
///
/// Column `c{j}` is numeric when `j` is even and categorical when odd.
/// Categorical columns cycle through eight labels. Every tenth cell of each
/// column is empty.
pub fn synthetic_table(rows: usize, columns: usize) -> Table {
    const LABELS: [&str; 8] = [
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
    ];

    (0..rows)
        .map(|i| {
            (0..columns)
                .map(|j| {
                    let value = if (i + j) % 10 == 0 {
                        String::new()
                    } else if j % 2 == 0 {
                        format!("{}.{}", (i * 7 + j) % 1000, i % 100)
                    } else {
                        LABELS[(i + j) % LABELS.len()].to_string()
                    };
                    (format!("c{j}"), value)
                })
                .collect::<Record>()
        })
        .collect()
}

/// CSV text matching [`sales_table`].
pub const SALES_CSV: &str = "region,revenue,units,campaign
north,120.5,3,promo
south,80,1,
north,99.99,2,
east,,5,clearance
south,45.25,,
north,310,7,promo
";
