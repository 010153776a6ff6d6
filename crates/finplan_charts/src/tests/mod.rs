//! Integration tests for the chart builders
//!
//! Tests are organized by builder:
//! - `portfolio` - Long-form reshaping and the simulated paths chart
//! - `pairplot` - Pairwise scatter grid
//! - `histogram` - Fixed-width binning and the bar chart
//! - `overlay` - Density estimate vs fitted distribution layers

mod overlay;

use crate::data::DataTable;

/// Route builder logs to the test harness. Safe to call from every test.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("finplan_charts=debug")),
        )
        .with_test_writer()
        .try_init();
}

pub(crate) fn single_column(name: &str, values: &[f64]) -> DataTable {
    DataTable::new().with_numeric(name, values.to_vec()).unwrap()
}
