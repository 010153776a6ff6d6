//! Gaussian kernel density estimation for the empirical overlay layer.

use statrs::statistics::Statistics;

use crate::density::Density;

/// Number of points sampled along the estimated curve
pub const KDE_SAMPLES: usize = 200;

const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Gaussian KDE over a fixed set of samples
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Build an estimator with a rule-of-thumb bandwidth.
    ///
    /// Returns `None` when `samples` is empty or contains non-finite values.
    pub fn new(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() || samples.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let bandwidth = scott_bandwidth(&sorted);
        Some(Self {
            samples: sorted,
            bandwidth,
        })
    }

    /// Build an estimator with an explicit bandwidth (must be finite and > 0)
    pub fn with_bandwidth(samples: &[f64], bandwidth: f64) -> Option<Self> {
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return None;
        }
        let mut kde = Self::new(samples)?;
        kde.bandwidth = bandwidth;
        Some(kde)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Smallest and largest sample
    pub fn extent(&self) -> (f64, f64) {
        // samples is sorted and non-empty
        (self.samples[0], self.samples[self.samples.len() - 1])
    }

    /// Sample the curve at `n` evenly spaced points over the sample extent.
    pub fn curve(&self, n: usize) -> Vec<(f64, f64)> {
        let (min, max) = self.extent();
        linspace(min, max, n)
            .into_iter()
            .map(|x| (x, self.pdf(x)))
            .collect()
    }
}

impl Density for GaussianKde {
    fn pdf(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let sum: f64 = self
            .samples
            .iter()
            .map(|&xi| {
                let u = (x - xi) / h;
                (-0.5 * u * u).exp()
            })
            .sum();
        sum * INV_SQRT_2PI / (h * self.samples.len() as f64)
    }
}

/// `n` linearly spaced points over `[start, end]`, endpoints included exactly.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            points[n - 1] = end;
            points
        }
    }
}

/// Linear-interpolated (R-7) quantile of sorted data, `p` in [0, 1].
///
/// Matches the quartiles Vega-Lite's density transform uses for its bandwidth;
/// `statrs` order statistics use a different estimator.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// `1.06 * min(sd, IQR / 1.34) * n^(-1/5)`, falling back to sd, |q1|, then 1
/// when the spread estimates are zero.
fn scott_bandwidth(sorted: &[f64]) -> f64 {
    let n = sorted.len() as f64;
    // sample standard deviation is undefined (NaN) for a single value
    let sd = if sorted.len() > 1 {
        sorted.iter().std_dev()
    } else {
        0.0
    };
    let q1 = quantile(sorted, 0.25);
    let iqr_scale = (quantile(sorted, 0.75) - q1) / 1.34;

    let spread = [sd.min(iqr_scale), sd, q1.abs()]
        .into_iter()
        .find(|v| *v > 0.0)
        .unwrap_or(1.0);
    1.06 * spread * n.powf(-0.2)
}
