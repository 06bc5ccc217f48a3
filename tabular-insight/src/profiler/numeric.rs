//! Descriptive statistics for numeric columns.

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// Decimal places applied to every reported statistic.
pub const DECIMAL_PLACES: i32 = 2;

/// Summary row for one numeric column.
///
/// `mean`, `std`, `min` and `max` are rounded to [`DECIMAL_PLACES`]. They are
/// all `None` exactly when `count` is zero: the sentinel row for a column
/// with no parsable values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    /// Number of values that parsed as finite floats.
    pub count: usize,
    pub mean: Option<f64>,
    /// Population standard deviation (denominator `count`).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    /// The zero-count sentinel row.
    pub fn unavailable(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            count: 0,
            mean: None,
            std: None,
            min: None,
            max: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.count > 0
    }
}

/// Summarizes one column. Cells that do not parse are skipped.
pub fn summarize_numeric<'a, I>(column: &str, cells: I) -> NumericSummary
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let values: Vec<f64> = cells.into_iter().filter_map(CellValue::as_f64).collect();
    if values.is_empty() {
        return NumericSummary::unavailable(column);
    }

    let count = values.len();
    let n = count as f64;

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in &values {
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }
    let mean = if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    };

    NumericSummary {
        column: column.to_string(),
        count,
        mean: Some(round_to(mean, DECIMAL_PLACES)),
        std: Some(round_to(population_std(&values, mean), DECIMAL_PLACES)),
        min: Some(round_to(min, DECIMAL_PLACES)),
        max: Some(round_to(max, DECIMAL_PLACES)),
    }
}

/// Squares of deviations near `f64::MAX` overflow. Those columns are
/// rescaled into `[-1, 1]` first; the population std never exceeds the
/// largest magnitude, so scaling back stays finite.
fn population_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if variance.is_finite() {
        return variance.sqrt();
    }
    let scale = values.iter().map(|v| v.abs()).fold(0.0, f64::max);
    let scaled_mean = values.iter().map(|v| v / scale / n).sum::<f64>();
    let scaled_variance = values
        .iter()
        .map(|v| (v / scale - scaled_mean).powi(2))
        .sum::<f64>()
        / n;
    scale * scaled_variance.sqrt()
}

/// Rounds half away from zero. Negative zero is normalized to zero.
///
/// Values too large to scale by `10^places` already have no fractional
/// digits and are returned as they are.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value + 0.0;
    }
    scaled.round() / factor + 0.0
}
