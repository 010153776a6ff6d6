//! Histogram-vs-distribution overlay.
//!
//! Two layers share an x scale: a kernel density estimate of the column drawn
//! as bars, and a fitted distribution's density drawn as a line. The two
//! densities generally differ in magnitude, so each layer keeps its own y scale.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::DEFAULT_COLOR;
use crate::chart::{
    Axis, Encoding, InlineData, LayerChart, Mark, PositionDef, Resolve, UnitSpec,
    VEGA_LITE_SCHEMA,
};
use crate::config::PlotConfig;
use crate::data::DataTable;
use crate::density::Density;
use crate::error::{PlotError, Result};
use crate::kde::{GaussianKde, KDE_SAMPLES, linspace};

/// Number of points the fitted density is evaluated at
pub const EVAL_GRID_POINTS: usize = 250;

pub const KDE_VALUE_FIELD: &str = "value";
pub const KDE_DENSITY_FIELD: &str = "density";
pub const PDF_X_FIELD: &str = "x";
pub const PDF_FIELD: &str = "PDF";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayOptions {
    /// Chart-level title
    pub title: Option<String>,
    pub hist_color: String,
    pub hist_opacity: f64,
    pub pdf_color: String,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            title: None,
            hist_color: DEFAULT_COLOR.to_string(),
            hist_opacity: 0.75,
            pdf_color: "red".to_string(),
        }
    }
}

/// Evenly spaced grid of [`EVAL_GRID_POINTS`] over `[min, max]`, endpoints included
pub fn evaluation_grid(min: f64, max: f64) -> Vec<f64> {
    linspace(min, max, EVAL_GRID_POINTS)
}

/// Layer a density estimate of `column` with `dist`'s density over the column's range.
pub fn hist_dist_plot<D: Density + ?Sized>(
    config: &PlotConfig,
    table: &DataTable,
    column: &str,
    dist: &D,
    options: &OverlayOptions,
) -> Result<LayerChart> {
    let values = table.finite_values(column)?;
    let distinct = count_distinct(&values);
    if distinct < 2 {
        return Err(PlotError::DegenerateColumn {
            column: column.to_string(),
            distinct,
        });
    }

    let kde = GaussianKde::new(&values).ok_or(PlotError::EmptyDataset)?;
    let (min, max) = kde.extent();
    tracing::debug!(
        column = column,
        samples = values.len(),
        bandwidth = kde.bandwidth(),
        min = min,
        max = max,
        "Building distribution overlay"
    );

    let empirical = kde
        .curve(KDE_SAMPLES)
        .into_iter()
        .map(|(x, d)| json!({ KDE_VALUE_FIELD: x, KDE_DENSITY_FIELD: d }))
        .collect();

    let grid = evaluation_grid(min, max);
    let pdf = dist.pdf_many(&grid);
    if pdf.len() != grid.len() {
        return Err(PlotError::LengthMismatch {
            what: "density evaluation",
            expected: grid.len(),
            actual: pdf.len(),
        });
    }
    if let Some((&x, &density)) = grid
        .iter()
        .zip(&pdf)
        .find(|(_, d)| !(d.is_finite() && **d >= 0.0))
    {
        return Err(PlotError::InvalidDensity { x, density });
    }
    let theoretical = grid
        .iter()
        .zip(&pdf)
        .map(|(&x, &d)| json!({ PDF_X_FIELD: x, PDF_FIELD: d }))
        .collect();

    let hist_layer = UnitSpec::new(
        Mark::bar()
            .color(options.hist_color.as_str())
            .opacity(options.hist_opacity),
        Encoding {
            x: Some(PositionDef::quantitative(KDE_VALUE_FIELD).title(column)),
            y: Some(
                PositionDef::quantitative(KDE_DENSITY_FIELD)
                    .title("")
                    .axis(Axis {
                        labels: Some(false),
                        ticks: Some(false),
                        grid: Some(false),
                        domain: Some(false),
                        ..Default::default()
                    }),
            ),
            ..Default::default()
        },
    )
    .data(InlineData::new(empirical));

    let pdf_layer = UnitSpec::new(
        Mark::line().color(options.pdf_color.as_str()),
        Encoding {
            x: Some(PositionDef::quantitative(PDF_X_FIELD).title(column)),
            y: Some(PositionDef::quantitative(PDF_FIELD).title("").axis(Axis {
                title: Some(None),
                labels: Some(false),
                ticks: Some(false),
                ..Default::default()
            })),
            ..Default::default()
        },
    )
    .data(InlineData::new(theoretical));

    Ok(LayerChart {
        schema: VEGA_LITE_SCHEMA.to_string(),
        title: options.title.clone(),
        width: f64::from(config.width),
        height: f64::from(config.height),
        layer: vec![hist_layer, pdf_layer],
        resolve: Resolve::shared_x_independent_y(),
    })
}

fn count_distinct(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}
