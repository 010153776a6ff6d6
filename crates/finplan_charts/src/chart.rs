//! Declarative chart specifications.
//!
//! A typed subset of Vega-Lite v5: unit charts (one mark), layered charts and
//! repeated grids. Builders in this crate only construct these values; any
//! Vega-Lite renderer can consume the exported JSON.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::Result;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// JSON export shared by every chart type
pub trait ChartSpec: Serialize {
    fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Any chart produced by this crate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Chart {
    Unit(UnitChart),
    Layer(LayerChart),
    Repeat(RepeatChart),
}

impl ChartSpec for Chart {}

impl From<UnitChart> for Chart {
    fn from(chart: UnitChart) -> Self {
        Chart::Unit(chart)
    }
}

impl From<LayerChart> for Chart {
    fn from(chart: LayerChart) -> Self {
        Chart::Layer(chart)
    }
}

impl From<RepeatChart> for Chart {
    fn from(chart: RepeatChart) -> Self {
        Chart::Repeat(chart)
    }
}

// ============================================================================
// Data
// ============================================================================

/// Rows embedded directly in the specification
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineData {
    pub values: Vec<Value>,
}

impl InlineData {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Serialize each record into one JSON row
    pub fn from_records<T: Serialize>(records: &[T]) -> Result<Self> {
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// Marks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Bar,
    Circle,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl Mark {
    fn of(kind: MarkType) -> Self {
        Self {
            kind,
            color: None,
            opacity: None,
            stroke_width: None,
        }
    }

    pub fn bar() -> Self {
        Self::of(MarkType::Bar)
    }

    pub fn circle() -> Self {
        Self::of(MarkType::Circle)
    }

    pub fn line() -> Self {
        Self::of(MarkType::Line)
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }
}

// ============================================================================
// Encodings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Temporal,
    Nominal,
}

/// Which axis of a repeated grid a field is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatRef {
    Row,
    Column,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Name(String),
    Repeat { repeat: RepeatRef },
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::Name(name.to_string())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::Name(name)
    }
}

impl From<RepeatRef> for Field {
    fn from(repeat: RepeatRef) -> Self {
        Field::Repeat { repeat }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<bool>,
}

/// Axis display options; `None` fields are left to the renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    /// `Some(None)` serializes as `null` and removes the title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinParams {
    /// Data is already binned; the renderer must not bin again
    pub binned: bool,
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionDef {
    pub field: Field,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<BinParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
}

impl PositionDef {
    pub fn new(field: impl Into<Field>, kind: FieldType) -> Self {
        Self {
            field: field.into(),
            kind,
            title: None,
            bin: None,
            scale: None,
            axis: None,
        }
    }

    pub fn quantitative(field: impl Into<Field>) -> Self {
        Self::new(field, FieldType::Quantitative)
    }

    pub fn temporal(field: impl Into<Field>) -> Self {
        Self::new(field, FieldType::Temporal)
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn bin(mut self, bin: BinParams) -> Self {
        self.bin = Some(bin);
        self
    }

    #[must_use]
    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }
}

/// End field of a ranged channel (`x2`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryDef {
    pub field: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Legend {
    #[default]
    Auto,
    Hidden,
}

impl Legend {
    fn is_auto(&self) -> bool {
        matches!(self, Legend::Auto)
    }
}

impl Serialize for Legend {
    // Vega-Lite hides a legend set to null; an empty object keeps the default
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Legend::Auto => serializer.serialize_map(Some(0))?.end(),
            Legend::Hidden => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorDef {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(skip_serializing_if = "Legend::is_auto")]
    pub legend: Legend,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<PositionDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x2: Option<SecondaryDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<PositionDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorDef>,
}

// ============================================================================
// Charts
// ============================================================================

/// A single mark bound to data. Used on its own or inside layers / repeats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InlineData>,
    pub mark: Mark,
    pub encoding: Encoding,
}

impl UnitSpec {
    pub fn new(mark: Mark, encoding: Encoding) -> Self {
        Self {
            title: None,
            width: None,
            height: None,
            data: None,
            mark,
            encoding,
        }
    }

    #[must_use]
    pub fn data(mut self, data: InlineData) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Top-level single-mark chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitChart {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(flatten)]
    pub spec: UnitSpec,
}

impl UnitChart {
    pub fn new(spec: UnitSpec) -> Self {
        Self {
            schema: VEGA_LITE_SCHEMA.to_string(),
            spec,
        }
    }
}

impl ChartSpec for UnitChart {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMode {
    Shared,
    Independent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolveMap {
    pub x: ResolveMode,
    pub y: ResolveMode,
}

/// How layers share scales and axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolve {
    pub scale: ResolveMap,
    pub axis: ResolveMap,
}

impl Resolve {
    /// Common x, independent y for both scale and axis
    pub fn shared_x_independent_y() -> Self {
        let map = ResolveMap {
            x: ResolveMode::Shared,
            y: ResolveMode::Independent,
        };
        Self {
            scale: map,
            axis: map,
        }
    }
}

/// Several marks drawn on top of each other
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerChart {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub width: f64,
    pub height: f64,
    pub layer: Vec<UnitSpec>,
    pub resolve: Resolve,
}

impl ChartSpec for LayerChart {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatDef {
    pub row: Vec<String>,
    pub column: Vec<String>,
}

/// One cell of a repeated grid: x is bound to `column`, y to `row`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub row: String,
    pub column: String,
}

/// A unit spec repeated over every (row, column) field pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatChart {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub data: InlineData,
    pub repeat: RepeatDef,
    pub spec: UnitSpec,
}

impl RepeatChart {
    /// Cells in row-major order, diagonal included
    pub fn cells(&self) -> Vec<GridCell> {
        self.repeat
            .row
            .iter()
            .flat_map(|row| {
                self.repeat.column.iter().map(move |column| GridCell {
                    row: row.clone(),
                    column: column.clone(),
                })
            })
            .collect()
    }
}

impl ChartSpec for RepeatChart {}
