//! Chart specification builders for financial planning results
//!
//! Turns in-memory simulation output and tabular statistics into declarative
//! Vega-Lite chart specifications. Nothing here renders; every builder returns
//! a serializable chart that a renderer consumes.
//!
//! - `simulated_portfolio_plot` - fan of simulated balance paths
//! - `pairplot` - scatter grid over every pair of columns
//! - `discrete_histogram` - counts in fixed-width bins
//! - `hist_dist_plot` - density estimate layered with a fitted distribution
//!
//! ```ignore
//! use finplan_charts::{ChartSpec, DataTable, PlotConfig, stats};
//! use statrs::distribution::Normal;
//!
//! let table = DataTable::new().with_numeric("returns", returns)?;
//! let fitted = Normal::new(0.07, 0.15)?;
//! let chart = stats::hist_dist_plot(
//!     &PlotConfig::default(),
//!     &table,
//!     "returns",
//!     &fitted,
//!     &stats::OverlayOptions::default(),
//! )?;
//! let json = chart.to_json_pretty()?;
//! ```

#![warn(clippy::all)]

pub mod chart;
pub mod config;
pub mod data;
pub mod density;
pub mod error;
pub mod kde;
pub mod portfolio;
pub mod stats;

#[cfg(test)]
mod tests;

pub use chart::{Chart, ChartSpec, LayerChart, RepeatChart, UnitChart};
pub use config::PlotConfig;
pub use data::{ColumnValues, DataTable, TrajectoryMatrix};
pub use density::{Density, PdfFn};
pub use error::{PlotError, Result};
pub use portfolio::{TrajectoryPoint, long_form, simulated_portfolio_plot};
pub use stats::{bin_counts, discrete_histogram, evaluation_grid, hist_dist_plot, pairplot};
