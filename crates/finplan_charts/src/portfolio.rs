//! Simulated portfolio trajectories.
//!
//! Reshapes a (steps x paths) matrix of simulated balances into long-form rows
//! and draws each path as a thin, semi-transparent line so the paths read as
//! a fan.

use jiff::civil::Date;
use serde::Serialize;

use crate::chart::{
    ColorDef, Encoding, FieldType, InlineData, Legend, Mark, PositionDef, UnitChart, UnitSpec,
};
use crate::config::PlotConfig;
use crate::data::TrajectoryMatrix;
use crate::error::{PlotError, Result};

pub const DATE_FIELD: &str = "Date";
pub const VALUE_FIELD: &str = "$";
pub const SIMULATION_FIELD: &str = "Simulation";

const LINE_STROKE_WIDTH: f64 = 1.0;
const LINE_OPACITY: f64 = 0.75;

/// One (date, value, simulation) observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    #[serde(rename = "Date")]
    pub date: Date,
    #[serde(rename = "$")]
    pub value: f64,
    #[serde(rename = "Simulation")]
    pub simulation: usize,
}

/// Flatten the first `sims` paths into long form.
///
/// `sims` is clamped to the number of available paths. Rows are grouped by
/// simulation, and each group keeps the order of `dates`.
pub fn long_form(
    balances: &TrajectoryMatrix,
    dates: &[Date],
    sims: usize,
) -> Result<Vec<TrajectoryPoint>> {
    if dates.len() != balances.steps() {
        return Err(PlotError::LengthMismatch {
            what: "date index",
            expected: balances.steps(),
            actual: dates.len(),
        });
    }

    let available = balances.paths();
    if sims > available {
        tracing::warn!(
            requested = sims,
            available = available,
            "Requested more simulations than available, clamping"
        );
    }
    let sims = sims.min(available);

    let mut rows = Vec::with_capacity(sims * dates.len());
    for simulation in 0..sims {
        rows.extend(
            dates
                .iter()
                .zip(balances.path(simulation))
                .map(|(&date, value)| TrajectoryPoint {
                    date,
                    value,
                    simulation,
                }),
        );
    }

    if rows.is_empty() {
        return Err(PlotError::EmptyDataset);
    }
    Ok(rows)
}

/// Line chart with one line per simulated path, colored by simulation id.
pub fn simulated_portfolio_plot(
    config: &PlotConfig,
    balances: &TrajectoryMatrix,
    dates: &[Date],
    sims: usize,
    title: Option<&str>,
) -> Result<UnitChart> {
    let rows = long_form(balances, dates, sims)?;
    tracing::debug!(
        rows = rows.len(),
        steps = balances.steps(),
        "Building simulated portfolio plot"
    );

    let encoding = Encoding {
        x: Some(PositionDef::temporal(DATE_FIELD).title("")),
        y: Some(PositionDef::quantitative(VALUE_FIELD)),
        color: Some(ColorDef {
            field: SIMULATION_FIELD.to_string(),
            kind: FieldType::Nominal,
            legend: Legend::Hidden,
        }),
        ..Default::default()
    };

    let mut spec = UnitSpec::new(
        Mark::line()
            .stroke_width(LINE_STROKE_WIDTH)
            .opacity(LINE_OPACITY),
        encoding,
    )
    .data(InlineData::from_records(&rows)?)
    .size(f64::from(config.width), f64::from(config.height));
    spec.title = title.map(str::to_string);

    Ok(UnitChart::new(spec))
}
