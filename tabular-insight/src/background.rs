//! Off-thread profiling for async callers.
//!
//! Profiling is CPU-bound and synchronous. Interactive callers that must stay
//! responsive hand the table to tokio's blocking pool and await the report.

use tracing::{error, instrument};

use crate::error::{InsightError, Result};
use crate::profiler::Profiler;
use crate::report::InsightReport;
use crate::table::Table;

/// Profiles `table` on the blocking thread pool.
///
/// Returns exactly what [`Profiler::profile`] would. A panicked or cancelled
/// worker becomes [`InsightError::Internal`].
///
/// # Examples
///
/// ```rust
/// use tabular_insight::background::profile_in_background;
/// use tabular_insight::prelude::*;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let table: Table = vec![Record::new().with("n", "1")].into();
/// let report = profile_in_background(Profiler::new(), table).await.unwrap();
/// assert_eq!(report.shape.rows, 1);
/// # })
/// ```
#[instrument(skip(profiler, table), fields(rows = table.row_count()))]
pub async fn profile_in_background(profiler: Profiler, table: Table) -> Result<InsightReport> {
    tokio::task::spawn_blocking(move || profiler.profile(&table))
        .await
        .map_err(|e| {
            error!(error = %e, "Background profiling task failed");
            InsightError::Internal(format!("Background profiling task failed: {e}"))
        })?
}
