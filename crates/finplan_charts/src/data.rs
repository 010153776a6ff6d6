//! In-memory inputs for the chart builders.
//!
//! - `TrajectoryMatrix` holds simulated paths as a (steps x paths) grid
//! - `DataTable` holds named numeric or temporal columns of equal length

use jiff::civil::Date;
use serde_json::{Map, Value};

use crate::error::{PlotError, Result};

/// Simulated trajectories with one row per time step and one column per path.
///
/// Values are stored row-major in a flat buffer, so `value(t, s)` lives at
/// `t * paths + s`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryMatrix {
    data: Vec<f64>,
    steps: usize,
    paths: usize,
}

impl TrajectoryMatrix {
    /// Create a matrix from a row-major buffer of `steps * paths` values.
    pub fn from_data(steps: usize, paths: usize, data: Vec<f64>) -> Result<Self> {
        let expected = steps * paths;
        if data.len() != expected {
            return Err(PlotError::LengthMismatch {
                what: "trajectory buffer",
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, steps, paths })
    }

    /// Create a matrix from per-step rows. Every row must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let paths = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * paths);
        for row in rows {
            let row = row.as_ref();
            if row.len() != paths {
                return Err(PlotError::LengthMismatch {
                    what: "trajectory row",
                    expected: paths,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            steps: rows.len(),
            paths,
        })
    }

    /// Number of time steps (rows)
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of simulated paths (columns)
    pub fn paths(&self) -> usize {
        self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn value(&self, step: usize, path: usize) -> Option<f64> {
        if step >= self.steps || path >= self.paths {
            return None;
        }
        Some(self.data[step * self.paths + path])
    }

    /// Iterate over one path in time order. Yields nothing for an out-of-range path.
    pub fn path(&self, path: usize) -> impl Iterator<Item = f64> + '_ {
        let steps = if path < self.paths { self.steps } else { 0 };
        (0..steps).map(move |t| self.data[t * self.paths + path])
    }
}

/// Values of a single named column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    /// Numeric values; `NaN` marks a missing entry
    Numeric(Vec<f64>),
    Temporal(Vec<Date>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Temporal(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn json_at(&self, row: usize) -> Value {
        match self {
            ColumnValues::Numeric(v) => {
                // serde_json has no NaN; missing values become null
                serde_json::Number::from_f64(v[row]).map_or(Value::Null, Value::Number)
            }
            ColumnValues::Temporal(v) => Value::String(v[row].to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

/// A table of named columns sharing one row count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<Column>,
}

impl DataTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a numeric column (builder style)
    pub fn with_numeric(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.push(name, ColumnValues::Numeric(values))?;
        Ok(self)
    }

    /// Append a temporal column (builder style)
    pub fn with_temporal(mut self, name: impl Into<String>, values: Vec<Date>) -> Result<Self> {
        self.push(name, ColumnValues::Temporal(values))?;
        Ok(self)
    }

    pub fn push(&mut self, name: impl Into<String>, values: ColumnValues) -> Result<()> {
        let name = name.into();
        if self.columns.iter().any(|c| c.name == name) {
            return Err(PlotError::DuplicateColumn(name));
        }
        if let Some(first) = self.columns.first() {
            if first.values.len() != values.len() {
                return Err(PlotError::LengthMismatch {
                    what: "column",
                    expected: first.values.len(),
                    actual: values.len(),
                });
            }
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| PlotError::ColumnNotFound(name.to_string()))
    }

    /// Borrow a numeric column's values
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        match &self.column(name)?.values {
            ColumnValues::Numeric(values) => Ok(values),
            ColumnValues::Temporal(_) => Err(PlotError::NotNumeric(name.to_string())),
        }
    }

    /// Non-missing values of a numeric column. Infinite values are rejected.
    pub fn finite_values(&self, name: &str) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(self.num_rows());
        for &v in self.numeric(name)? {
            if v.is_nan() {
                continue;
            }
            if v.is_infinite() {
                return Err(PlotError::NonFiniteValue {
                    column: name.to_string(),
                    value: v,
                });
            }
            out.push(v);
        }
        Ok(out)
    }

    /// Row-oriented JSON records, one object per row keyed by column name.
    pub fn to_records(&self) -> Vec<Value> {
        (0..self.num_rows())
            .map(|row| {
                let record: Map<String, Value> = self
                    .columns
                    .iter()
                    .map(|c| (c.name.clone(), c.values.json_at(row)))
                    .collect();
                Value::Object(record)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_layout() {
        let m = TrajectoryMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
            .unwrap();
        assert_eq!(m.steps(), 3);
        assert_eq!(m.paths(), 2);
        assert_eq!(m.value(1, 0), Some(3.0));
        assert_eq!(m.value(3, 0), None);
        assert_eq!(m.path(1).collect::<Vec<_>>(), vec![2.0, 4.0, 6.0]);
        assert_eq!(m.path(2).count(), 0);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = TrajectoryMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(
            err,
            PlotError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_from_data_checks_shape() {
        assert!(TrajectoryMatrix::from_data(2, 2, vec![0.0; 4]).is_ok());
        assert!(TrajectoryMatrix::from_data(2, 3, vec![0.0; 4]).is_err());
    }

    #[test]
    fn test_table_rejects_mismatched_and_duplicate_columns() {
        let table = DataTable::new().with_numeric("a", vec![1.0, 2.0]).unwrap();
        assert!(matches!(
            table.clone().with_numeric("b", vec![1.0]),
            Err(PlotError::LengthMismatch { .. })
        ));
        assert!(matches!(
            table.with_numeric("a", vec![3.0, 4.0]),
            Err(PlotError::DuplicateColumn(_))
        ));
    }

    #[test]
    fn test_finite_values_skips_missing() {
        let table = DataTable::new()
            .with_numeric("x", vec![1.0, f64::NAN, 3.0])
            .unwrap();
        assert_eq!(table.finite_values("x").unwrap(), vec![1.0, 3.0]);
        assert!(matches!(
            table.finite_values("y"),
            Err(PlotError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_records_serialize_dates_and_missing() {
        let table = DataTable::new()
            .with_temporal("when", vec![jiff::civil::date(2025, 1, 31)])
            .unwrap()
            .with_numeric("x", vec![f64::NAN])
            .unwrap();
        let records = table.to_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["when"], "2025-01-31");
        assert!(records[0]["x"].is_null());
        assert!(matches!(table.numeric("when"), Err(PlotError::NotNumeric(_))));
    }
}
