// src/visualization/mod.rs

pub mod console;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub enabled: bool,
    /// Filtered value mapped to the right edge, `-max_value` maps to the left.
    pub max_value: f64,
    /// Plot width in columns.
    pub width: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_value: 10.0,
            width: 50,
        }
    }
}

impl PlotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::error::require_positive("plot max_value", self.max_value)?;
        if self.width < 4 {
            return Err(ConfigError::PlotTooNarrow(self.width));
        }
        Ok(())
    }
}
