use thiserror::Error;

/// Errors raised while validating chart inputs or exporting a chart
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("column {0:?} not found")]
    ColumnNotFound(String),

    #[error("column {0:?} is not numeric")]
    NotNumeric(String),

    #[error("column {0:?} already exists")]
    DuplicateColumn(String),

    #[error("{what} length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Density estimation needs at least two distinct values
    #[error("column {column:?} has {distinct} distinct value(s), need at least 2")]
    DegenerateColumn { column: String, distinct: usize },

    #[error("bin step must be finite and positive, got {0}")]
    InvalidBinStep(f64),

    #[error("value {value} is too far from zero for bin step {step}")]
    BinOutOfRange { value: f64, step: f64 },

    #[error("column {column:?} contains non-finite value {value}")]
    NonFiniteValue { column: String, value: f64 },

    #[error("density evaluated to {density} at x={x}")]
    InvalidDensity { x: f64, density: f64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlotError>;
