use serde::{Deserialize, Serialize};

use super::DEFAULT_COLOR;
use crate::chart::{
    Encoding, InlineData, Mark, PositionDef, RepeatChart, RepeatDef, RepeatRef, Scale, UnitSpec,
    VEGA_LITE_SCHEMA,
};
use crate::config::PlotConfig;
use crate::data::{ColumnValues, DataTable};
use crate::error::{PlotError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairplotOptions {
    pub color: String,
    pub opacity: f64,
    /// Width of each cell in pixels
    pub width: u32,
}

impl Default for PairplotOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            opacity: 0.25,
            width: 180,
        }
    }
}

/// Scatter grid with one cell per ordered pair of columns (diagonal included).
///
/// Both axes use non-zero-origin scales so each cell shows the data's own range.
pub fn pairplot(
    config: &PlotConfig,
    table: &DataTable,
    options: &PairplotOptions,
) -> Result<RepeatChart> {
    if table.num_columns() == 0 || table.is_empty() {
        return Err(PlotError::EmptyDataset);
    }
    if let Some(column) = table
        .columns()
        .iter()
        .find(|c| !matches!(c.values, ColumnValues::Numeric(_)))
    {
        return Err(PlotError::NotNumeric(column.name.clone()));
    }

    let names = table.column_names();
    tracing::debug!(
        columns = names.len(),
        rows = table.num_rows(),
        "Building pairplot"
    );

    let no_zero = Scale { zero: Some(false) };
    let encoding = Encoding {
        x: Some(PositionDef::quantitative(RepeatRef::Column).scale(no_zero.clone())),
        y: Some(PositionDef::quantitative(RepeatRef::Row).scale(no_zero)),
        ..Default::default()
    };

    let spec = UnitSpec::new(
        Mark::circle()
            .color(options.color.as_str())
            .opacity(options.opacity),
        encoding,
    )
    .size(f64::from(options.width), config.grid_cell_height());

    Ok(RepeatChart {
        schema: VEGA_LITE_SCHEMA.to_string(),
        data: InlineData::new(table.to_records()),
        repeat: RepeatDef {
            row: names.clone(),
            column: names,
        },
        spec,
    })
}
