use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DEFAULT_COLOR;
use crate::chart::{
    BinParams, Encoding, InlineData, Mark, PositionDef, SecondaryDef, UnitChart, UnitSpec,
};
use crate::config::PlotConfig;
use crate::data::DataTable;
use crate::error::{PlotError, Result};

pub const BIN_START_FIELD: &str = "bin_start";
pub const BIN_END_FIELD: &str = "bin_end";
pub const COUNT_FIELD: &str = "count";

/// Largest bin index (2^53) whose neighbours are still distinct `f64` values
const MAX_BIN_INDEX: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramOptions {
    pub color: String,
    pub opacity: f64,
    /// Bin width; bins start at integer multiples of the step
    pub bin_step: f64,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            opacity: 0.75,
            bin_step: 1.0,
        }
    }
}

/// A non-empty bin covering `[bin_start, bin_end)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub bin_start: f64,
    pub bin_end: f64,
    pub count: usize,
}

/// Count values into bins of width `step`, returned in ascending order.
///
/// Only non-empty bins are returned. Non-finite values are skipped. A value
/// whose bin index `floor(v / step)` cannot be represented exactly is rejected
/// with `PlotError::BinOutOfRange`.
pub fn bin_counts(values: &[f64], step: f64) -> Result<Vec<HistogramBin>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(PlotError::InvalidBinStep(step));
    }

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &v in values.iter().filter(|v| v.is_finite()) {
        let index = (v / step).floor();
        if index.abs() >= MAX_BIN_INDEX {
            return Err(PlotError::BinOutOfRange { value: v, step });
        }
        *counts.entry(index as i64).or_default() += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(k, count)| HistogramBin {
            bin_start: k as f64 * step,
            bin_end: (k + 1) as f64 * step,
            count,
        })
        .collect())
}

/// Bar chart of counts per fixed-width bin of `column`.
pub fn discrete_histogram(
    config: &PlotConfig,
    table: &DataTable,
    column: &str,
    options: &HistogramOptions,
) -> Result<UnitChart> {
    let values = table.finite_values(column)?;
    if values.is_empty() {
        return Err(PlotError::EmptyDataset);
    }
    let bins = bin_counts(&values, options.bin_step)?;
    tracing::debug!(
        column = column,
        values = values.len(),
        bins = bins.len(),
        "Building discrete histogram"
    );

    let encoding = Encoding {
        x: Some(
            PositionDef::quantitative(BIN_START_FIELD)
                .title(column)
                .bin(BinParams {
                    binned: true,
                    step: options.bin_step,
                }),
        ),
        x2: Some(SecondaryDef {
            field: BIN_END_FIELD.to_string(),
        }),
        y: Some(PositionDef::quantitative(COUNT_FIELD).title("Count of Records")),
        ..Default::default()
    };

    let spec = UnitSpec::new(
        Mark::bar()
            .color(options.color.as_str())
            .opacity(options.opacity),
        encoding,
    )
    .data(InlineData::from_records(&bins)?)
    .size(f64::from(config.width), f64::from(config.height));

    Ok(UnitChart::new(spec))
}
