//! # ledger-grid
//!
//! A hierarchical, editable grid model for budget and ledger style tables.
//!
//! Rows form a tree of collapsible groups and data rows; columns are typed
//! (text, number, currency, date, select) and may be derived from other
//! columns. The grid owns everything interaction needs and nothing about
//! drawing: renderers read a [`GridSnapshot`] and feed pointer and key events
//! back in.
//!
//! ## Features
//!
//! - Depth-first flattening of the row tree honoring expand/collapse state
//! - Single-cell editing with Enter/Escape/Tab/Shift+Tab semantics
//! - Controlled or self-managed commits
//! - Derived columns ([`Formula::SumOf`] totals or custom closures)
//! - Drag-to-resize columns with a minimum width, frozen leading columns
//! - JSON documents (with the `serde` feature)
//!
//! ## Example
//!
//! ```rust
//! use ledger_grid::prelude::*;
//!
//! let columns = vec![
//!     Column::new("account", "ACCOUNT").with_editable(false),
//!     Column::new("jan", "JAN").with_type(ColumnType::Currency),
//!     Column::new("total", "TOTAL")
//!         .with_type(ColumnType::Currency)
//!         .with_editable(false)
//!         .with_formula(Formula::sum_of(["jan"])),
//! ];
//! let rows = vec![Row::group(
//!     "income",
//!     "Income",
//!     vec![
//!         Row::leaf("sales", "Sales").with_value("jan", 100.0),
//!         Row::leaf("services", "Services").with_value("jan", 200.0),
//!     ],
//! )];
//!
//! let grid = GridView::self_managed(columns, rows, GridOptions::default())?;
//! assert_eq!(grid.cell_value("income", "total"), Some(CellValue::Number(300.0)));
//!
//! let snapshot = grid.snapshot();
//! assert_eq!(snapshot.rows.len(), 1); // groups start collapsed
//! # Ok::<(), ledger_grid::Error>(())
//! ```

pub mod commit;
#[cfg(feature = "serde")]
pub mod document;
pub mod edit;
pub mod expansion;
pub mod flatten;
pub mod index;
pub mod layout;
pub mod options;
pub mod prelude;
pub mod render;
pub mod resolve;
pub mod view;

pub use commit::{CellChangeHandler, CommitStrategy, GridEvents, NoEvents};
#[cfg(feature = "serde")]
pub use document::GridDocument;
pub use edit::{
    next_position, parse_draft, CellEditor, Direction, EditState, EditingCell, GridKey,
    PendingCommit,
};
pub use expansion::ExpansionState;
pub use flatten::{flatten, flatten_owned, FlatRow};
pub use index::RowIndex;
pub use layout::{partition, ActiveResize, ColumnLayout, ResizeGuard};
pub use options::GridOptions;
pub use render::{GridSnapshot, HeaderCell, RenderedCell, RenderedRow, Toolbar};
pub use resolve::{display, display_value, resolve, DisplayCell};
pub use view::GridView;

// Re-export core types
pub use ledger_grid_core::{
    count_rows, parse_leading_float, validate_columns, validate_forest, CellValue, Column,
    ColumnId, ColumnType, CurrencyFormat, CurrencyFormatter, CustomFormula, Error, Formula,
    Result, Row, RowData, RowId, SymbolPosition, DEFAULT_COLUMN_WIDTH, INDENT_PER_LEVEL,
    MIN_COLUMN_WIDTH, PLACEHOLDER,
};
