//! Tests for the density estimate vs fitted distribution overlay

use rand::{SeedableRng, rngs::StdRng};
use rand_distr::Distribution;
use serde_json::json;
use statrs::distribution::Normal;

use super::{init_tracing, single_column};
use crate::chart::{ChartSpec, MarkType};
use crate::config::PlotConfig;
use crate::density::{Density, PdfFn};
use crate::error::PlotError;
use crate::kde::KDE_SAMPLES;
use crate::stats::{EVAL_GRID_POINTS, OverlayOptions, evaluation_grid, hist_dist_plot};

/// Seeded normal draws
fn normal_samples(mean: f64, std_dev: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = rand_distr::Normal::new(mean, std_dev).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

fn layer_values(value: &serde_json::Value, layer: usize) -> Vec<serde_json::Value> {
    value["layer"][layer]["data"]["values"]
        .as_array()
        .unwrap()
        .clone()
}

#[test]
fn test_evaluation_grid_spans_range() {
    let grid = evaluation_grid(0.0, 10.0);
    assert_eq!(grid.len(), 250);
    assert_eq!(grid[0], 0.0);
    assert_eq!(grid[249], 10.0);
}

#[test]
fn test_theoretical_layer_evaluated_over_column_range() {
    init_tracing();
    let samples = normal_samples(0.07, 0.15, 500, 42);
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let table = single_column("returns", &samples);
    let fitted = Normal::new(0.07, 0.15).unwrap();

    let chart = hist_dist_plot(
        &PlotConfig::default(),
        &table,
        "returns",
        &fitted,
        &OverlayOptions::default(),
    )
    .unwrap();

    assert_eq!(chart.layer.len(), 2);
    assert_eq!(chart.layer[0].mark.kind, MarkType::Bar);
    assert_eq!(chart.layer[1].mark.kind, MarkType::Line);

    let value = chart.to_value().unwrap();
    let pdf_rows = layer_values(&value, 1);
    assert_eq!(pdf_rows.len(), EVAL_GRID_POINTS);
    assert_eq!(pdf_rows[0]["x"].as_f64().unwrap(), min);
    assert_eq!(pdf_rows[EVAL_GRID_POINTS - 1]["x"].as_f64().unwrap(), max);
    for row in &pdf_rows {
        let x = row["x"].as_f64().unwrap();
        let pdf = row["PDF"].as_f64().unwrap();
        assert!((pdf - Density::pdf(&fitted, x)).abs() < 1e-12);
    }

    let kde_rows = layer_values(&value, 0);
    assert_eq!(kde_rows.len(), KDE_SAMPLES);
    assert!(kde_rows.iter().all(|r| r["density"].as_f64().unwrap() > 0.0));
}

#[test]
fn test_empirical_peak_near_sample_mean() {
    let samples = normal_samples(10.0, 2.0, 2000, 7);
    let table = single_column("x", &samples);
    let fitted = Normal::new(10.0, 2.0).unwrap();

    let value = hist_dist_plot(
        &PlotConfig::default(),
        &table,
        "x",
        &fitted,
        &OverlayOptions::default(),
    )
    .unwrap()
    .to_value()
    .unwrap();

    let peak = layer_values(&value, 0)
        .into_iter()
        .max_by(|a, b| {
            a["density"]
                .as_f64()
                .unwrap()
                .total_cmp(&b["density"].as_f64().unwrap())
        })
        .unwrap();
    let peak_x = peak["value"].as_f64().unwrap();
    assert!((peak_x - 10.0).abs() < 1.0, "peak at {peak_x}");
}

#[test]
fn test_layers_share_x_and_resolve_y_independently() {
    let table = single_column("x", &[0.0, 2.5, 5.0, 7.5, 10.0]);
    let options = OverlayOptions {
        title: Some("Fit quality".into()),
        pdf_color: "black".into(),
        ..Default::default()
    };
    let uniform = PdfFn(|x: f64| if (0.0..=10.0).contains(&x) { 0.1 } else { 0.0 });

    let value = hist_dist_plot(&PlotConfig::new(200, 400), &table, "x", &uniform, &options)
        .unwrap()
        .to_value()
        .unwrap();

    assert_eq!(
        value["resolve"],
        json!({
            "scale": {"x": "shared", "y": "independent"},
            "axis": {"x": "shared", "y": "independent"}
        })
    );
    assert_eq!(value["title"], "Fit quality");
    assert!(value["layer"][0].get("title").is_none());
    assert!(value["layer"][1].get("title").is_none());
    assert_eq!(value["width"], 400.0);
    assert_eq!(value["height"], 200.0);

    assert_eq!(
        value["layer"][0]["encoding"]["y"]["axis"],
        json!({"labels": false, "ticks": false, "grid": false, "domain": false})
    );
    assert_eq!(
        value["layer"][1]["encoding"]["y"]["axis"],
        json!({"title": null, "labels": false, "ticks": false})
    );
    assert_eq!(value["layer"][1]["mark"], json!({"type": "line", "color": "black"}));
    assert_eq!(value["layer"][0]["encoding"]["x"]["field"], "value");
    assert_eq!(value["layer"][1]["encoding"]["x"]["field"], "x");
    assert_eq!(value["layer"][0]["encoding"]["x"]["title"], "x");
    assert_eq!(value["layer"][1]["encoding"]["x"]["title"], "x");
}

#[test]
fn test_column_named_like_density_field_keeps_grid_values() {
    let table = single_column("PDF", &[0.0, 1.0, 2.0]);
    let fitted = Normal::new(1.0, 1.0).unwrap();

    let value = hist_dist_plot(
        &PlotConfig::default(),
        &table,
        "PDF",
        &fitted,
        &OverlayOptions::default(),
    )
    .unwrap()
    .to_value()
    .unwrap();

    let pdf_rows = layer_values(&value, 1);
    assert_eq!(pdf_rows[0]["x"].as_f64().unwrap(), 0.0);
    assert_eq!(pdf_rows[EVAL_GRID_POINTS - 1]["x"].as_f64().unwrap(), 2.0);
    let peak = pdf_rows[0]["PDF"].as_f64().unwrap();
    assert!((peak - Density::pdf(&fitted, 0.0)).abs() < 1e-12);
    assert_eq!(value["layer"][1]["encoding"]["x"]["title"], "PDF");
    assert_eq!(value["layer"][1]["encoding"]["y"]["field"], "PDF");
}

#[test]
fn test_missing_or_temporal_column_rejected() {
    let fitted = Normal::new(0.0, 1.0).unwrap();
    let config = PlotConfig::default();
    let options = OverlayOptions::default();
    let table = single_column("x", &[1.0, 2.0])
        .with_temporal(
            "when",
            vec![jiff::civil::date(2025, 1, 1), jiff::civil::date(2025, 2, 1)],
        )
        .unwrap();

    assert!(matches!(
        hist_dist_plot(&config, &table, "missing", &fitted, &options),
        Err(PlotError::ColumnNotFound(name)) if name == "missing"
    ));
    assert!(matches!(
        hist_dist_plot(&config, &table, "when", &fitted, &options),
        Err(PlotError::NotNumeric(name)) if name == "when"
    ));
}

#[test]
fn test_degenerate_column_rejected() {
    let fitted = Normal::new(0.0, 1.0).unwrap();
    let config = PlotConfig::default();
    let options = OverlayOptions::default();

    let constant = single_column("x", &[3.0, 3.0, 3.0, f64::NAN]);
    assert!(matches!(
        hist_dist_plot(&config, &constant, "x", &fitted, &options),
        Err(PlotError::DegenerateColumn { distinct: 1, .. })
    ));

    let empty = single_column("x", &[]);
    assert!(matches!(
        hist_dist_plot(&config, &empty, "x", &fitted, &options),
        Err(PlotError::DegenerateColumn { distinct: 0, .. })
    ));
}

#[test]
fn test_invalid_density_rejected() {
    let table = single_column("x", &[1.0, 2.0, 3.0]);
    let negative = PdfFn(|x: f64| 1.0 - x);

    let err = hist_dist_plot(
        &PlotConfig::default(),
        &table,
        "x",
        &negative,
        &OverlayOptions::default(),
    )
    .unwrap_err();
    match err {
        PlotError::InvalidDensity { x, density } => {
            assert!(x > 1.0);
            assert!(density < 0.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

struct Truncating;

impl Density for Truncating {
    fn pdf(&self, _x: f64) -> f64 {
        1.0
    }

    fn pdf_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().skip(1).map(|&x| self.pdf(x)).collect()
    }
}

#[test]
fn test_short_density_evaluation_rejected() {
    let table = single_column("x", &[1.0, 2.0]);
    assert!(matches!(
        hist_dist_plot(
            &PlotConfig::default(),
            &table,
            "x",
            &Truncating,
            &OverlayOptions::default(),
        ),
        Err(PlotError::LengthMismatch {
            expected: 250,
            actual: 249,
            ..
        })
    ));
}

#[test]
fn test_boxed_distribution() {
    let table = single_column("x", &[1.0, 2.0, 4.0]);
    let boxed: Box<dyn Density> = Box::new(Normal::new(2.0, 1.0).unwrap());
    assert!(
        hist_dist_plot(
            &PlotConfig::default(),
            &table,
            "x",
            &boxed,
            &OverlayOptions::default(),
        )
        .is_ok()
    );
}
