//! Probability density capability consumed by the overlay builder.
//!
//! Anything that can evaluate a density at a point implements [`Density`].
//! Fitted `statrs` distributions implement it directly; closures can be
//! wrapped in [`PdfFn`].

use statrs::distribution::{
    Beta, Cauchy, ChiSquared, Continuous, Exp, Gamma, Laplace, LogNormal, Normal, StudentsT,
    Uniform, Weibull,
};

/// A pure mapping from a value to a probability density (finite, >= 0).
pub trait Density {
    fn pdf(&self, x: f64) -> f64;

    /// Evaluate the density at every point of `xs`
    fn pdf_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.pdf(x)).collect()
    }
}

impl<D: Density + ?Sized> Density for &D {
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }

    fn pdf_many(&self, xs: &[f64]) -> Vec<f64> {
        (**self).pdf_many(xs)
    }
}

impl<D: Density + ?Sized> Density for Box<D> {
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }

    fn pdf_many(&self, xs: &[f64]) -> Vec<f64> {
        (**self).pdf_many(xs)
    }
}

/// Adapter turning a closure into a [`Density`]
#[derive(Debug, Clone, Copy)]
pub struct PdfFn<F>(pub F);

impl<F: Fn(f64) -> f64> Density for PdfFn<F> {
    fn pdf(&self, x: f64) -> f64 {
        (self.0)(x)
    }
}

macro_rules! impl_statrs_density {
    ($($dist:ty),* $(,)?) => {
        $(
            impl Density for $dist {
                fn pdf(&self, x: f64) -> f64 {
                    Continuous::pdf(self, x)
                }
            }
        )*
    };
}

impl_statrs_density!(
    Beta, Cauchy, ChiSquared, Exp, Gamma, Laplace, LogNormal, Normal, StudentsT, Uniform, Weibull,
);
