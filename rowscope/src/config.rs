//! Grid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::selection::SelectionMode;

/// Per-grid configuration.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Fixed row height in pixels.
    pub row_height: f64,
    /// Rows rendered above and below the visible area.
    pub overscan: usize,
    /// Lower width bound for columns without their own `min_width`.
    pub min_column_width: f64,
    /// Upper width bound for columns without their own `max_width`.
    pub max_column_width: f64,
    /// Rows per page in paged mode.
    pub page_size: usize,
    /// Start in paged mode instead of continuous scrolling.
    pub paged: bool,
    pub selection_mode: SelectionMode,
    /// Rows moved by PageUp/PageDown when the container height is unknown.
    pub page_step: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: 32.0,
            overscan: 3,
            min_column_width: 40.0,
            max_column_width: 2000.0,
            page_size: 50,
            paged: false,
            selection_mode: SelectionMode::Multiple,
            page_step: 10,
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row height.
    pub fn row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    /// Set the overscan row count.
    pub fn overscan(mut self, rows: usize) -> Self {
        self.overscan = rows;
        self
    }

    /// Set the grid-wide column width bounds.
    pub fn column_width_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_column_width = min;
        self.max_column_width = max;
        self
    }

    /// Use paged windowing with the given page size.
    pub fn paged(mut self, page_size: usize) -> Self {
        self.paged = true;
        self.page_size = page_size;
        self
    }

    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Parse a JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "row_height",
                reason: format!("must be a positive number, got {}", self.row_height),
            });
        }
        if !self.min_column_width.is_finite() || self.min_column_width < 0.0 {
            return Err(ConfigError::Invalid {
                field: "min_column_width",
                reason: format!("must be non-negative, got {}", self.min_column_width),
            });
        }
        if !self.max_column_width.is_finite() || self.max_column_width < self.min_column_width {
            return Err(ConfigError::Invalid {
                field: "max_column_width",
                reason: format!(
                    "must be at least min_column_width ({}), got {}",
                    self.min_column_width, self.max_column_width
                ),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "page_size",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
