//! Layout configuration shared by every chart builder.
//!
//! `PlotConfig` replaces process-wide plot size constants: callers build one
//! (or load it from YAML) and pass it to each builder explicitly.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};

pub const DEFAULT_PLOT_HEIGHT: u32 = 300;
pub const DEFAULT_PLOT_WIDTH: u32 = 600;

/// Standard plot dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub height: u32,
    pub width: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_PLOT_HEIGHT,
            width: DEFAULT_PLOT_WIDTH,
        }
    }
}

impl PlotConfig {
    #[must_use]
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Height of one cell in a pairwise grid (a third of the standard height)
    #[must_use]
    pub fn grid_cell_height(&self) -> f64 {
        f64::from(self.height) / 3.0
    }

    /// Parse a config from YAML. Missing fields fall back to the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| PlotError::Config(format!("failed to parse plot config: {e}")))
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| PlotError::Config(format!("failed to serialize plot config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let config = PlotConfig::default();
        assert_eq!(config.height, DEFAULT_PLOT_HEIGHT);
        assert_eq!(config.width, DEFAULT_PLOT_WIDTH);
        assert_eq!(config.grid_cell_height(), 100.0);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = PlotConfig::from_yaml_str("height: 450\n").unwrap();
        assert_eq!(config.height, 450);
        assert_eq!(config.width, DEFAULT_PLOT_WIDTH);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = PlotConfig::new(240, 720);
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(PlotConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = PlotConfig::from_yaml_str("height: tall\n").unwrap_err();
        assert!(matches!(err, PlotError::Config(_)));
    }
}
