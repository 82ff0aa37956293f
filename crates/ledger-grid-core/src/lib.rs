//! # ledger-grid-core
//!
//! Core data structures for the ledger-grid hierarchical editable grid.
//!
//! This crate provides the fundamental types used throughout ledger-grid:
//! - [`Column`] and [`ColumnType`] - Column definitions
//! - [`Row`] and [`RowData`] - Hierarchical rows and their typed value maps
//! - [`CellValue`] - Raw cell values (numbers, text, dates)
//! - [`Formula`] - Derived column values (totals, custom computations)
//! - [`CurrencyFormat`] - Currency display settings
//!
//! ## Example
//!
//! ```rust
//! use ledger_grid_core::{CellValue, Formula, Row};
//!
//! let income = Row::group(
//!     "income",
//!     "Income",
//!     vec![
//!         Row::leaf("sales", "Sales").with_value("jan", 100.0),
//!         Row::leaf("services", "Services").with_value("jan", 200.0),
//!     ],
//! );
//!
//! let total = Formula::sum_of(["jan"]);
//! assert_eq!(total.evaluate(&income, &[]), CellValue::Number(300.0));
//! ```

pub mod column;
pub mod error;
pub mod format;
pub mod formula;
pub mod row;
pub mod value;

// Re-exports for convenience
pub use column::{validate_columns, Column, ColumnId, ColumnType};
pub use error::{Error, Result};
pub use format::{CurrencyFormat, CurrencyFormatter, SymbolPosition};
pub use formula::{CustomFormula, Formula};
pub use row::{count_rows, validate_forest, Row, RowData, RowId};
pub use value::{parse_leading_float, CellValue};

/// Default column width in pixels
pub const DEFAULT_COLUMN_WIDTH: f64 = 150.0;

/// Default lower bound for interactive column resize, in pixels
pub const MIN_COLUMN_WIDTH: f64 = 100.0;

/// Default horizontal indent per hierarchy level, in pixels
pub const INDENT_PER_LEVEL: f64 = 24.0;

/// Text shown in place of blank cells
pub const PLACEHOLDER: &str = "\u{2014}";
