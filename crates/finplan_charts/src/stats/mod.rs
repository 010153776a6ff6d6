//! Statistical chart builders
//!
//! - `pairplot` - scatter grid over every pair of numeric columns
//! - `histogram` - counts in fixed-width bins
//! - `overlay` - empirical density against a fitted distribution

pub mod histogram;
pub mod overlay;
pub mod pairplot;

pub use histogram::{HistogramBin, HistogramOptions, bin_counts, discrete_histogram};
pub use overlay::{EVAL_GRID_POINTS, OverlayOptions, evaluation_grid, hist_dist_plot};
pub use pairplot::{PairplotOptions, pairplot};

pub(crate) const DEFAULT_COLOR: &str = "dodgerblue";
