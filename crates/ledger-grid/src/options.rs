//! Grid configuration

use ledger_grid_core::{Error, Result, DEFAULT_COLUMN_WIDTH, INDENT_PER_LEVEL, MIN_COLUMN_WIDTH};

/// Options for a grid instance
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    /// Offer the "add row" toolbar action (default: true)
    pub show_add_row: bool,
    /// Offer the "add column" toolbar action (default: true)
    pub show_add_column: bool,
    /// Number of leading visible columns pinned to the left (default: 1)
    pub frozen_columns: usize,
    /// Width for columns that declare none (default: 150)
    pub default_column_width: f64,
    /// Lower bound for interactive resize (default: 100)
    pub min_column_width: f64,
    /// Start with every group expanded (default: false)
    pub default_expanded: bool,
    /// Indent per hierarchy level in the label column (default: 24)
    pub indent_per_level: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            show_add_row: true,
            show_add_column: true,
            frozen_columns: 1,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_column_width: MIN_COLUMN_WIDTH,
            default_expanded: false,
            indent_per_level: INDENT_PER_LEVEL,
        }
    }
}

impl GridOptions {
    /// Set the number of frozen columns
    pub fn with_frozen_columns(mut self, count: usize) -> Self {
        self.frozen_columns = count;
        self
    }

    /// Set the default column width
    pub fn with_default_column_width(mut self, width: f64) -> Self {
        self.default_column_width = width;
        self
    }

    /// Set the minimum column width
    pub fn with_min_column_width(mut self, width: f64) -> Self {
        self.min_column_width = width;
        self
    }

    /// Set whether every group starts expanded
    pub fn with_default_expanded(mut self, expanded: bool) -> Self {
        self.default_expanded = expanded;
        self
    }

    /// Set toolbar visibility
    pub fn with_toolbar(mut self, show_add_row: bool, show_add_column: bool) -> Self {
        self.show_add_row = show_add_row;
        self.show_add_column = show_add_column;
        self
    }

    /// Check that widths are usable
    pub fn validate(&self) -> Result<()> {
        if !(self.default_column_width.is_finite() && self.default_column_width > 0.0) {
            return Err(Error::invalid_option(
                "default_column_width",
                format!("must be a positive width, got {}", self.default_column_width),
            ));
        }
        if !(self.min_column_width.is_finite() && self.min_column_width > 0.0) {
            return Err(Error::invalid_option(
                "min_column_width",
                format!("must be a positive width, got {}", self.min_column_width),
            ));
        }
        if self.min_column_width > self.default_column_width {
            return Err(Error::invalid_option(
                "min_column_width",
                format!(
                    "{} exceeds default_column_width {}",
                    self.min_column_width, self.default_column_width
                ),
            ));
        }
        if !(self.indent_per_level.is_finite() && self.indent_per_level >= 0.0) {
            return Err(Error::invalid_option(
                "indent_per_level",
                "must be a non-negative width",
            ));
        }
        Ok(())
    }
}
