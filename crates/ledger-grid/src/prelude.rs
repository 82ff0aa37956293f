//! Prelude module - common imports for ledger-grid users
//!
//! ```rust
//! use ledger_grid::prelude::*;
//! ```

pub use crate::{
    // Data model
    CellValue,
    Column,
    ColumnId,
    ColumnType,
    Row,
    RowData,
    RowId,

    // Derived values and display
    CurrencyFormat,
    CurrencyFormatter,
    Formula,

    // Errors
    Error,
    Result,

    // Grid
    CellChangeHandler,
    CommitStrategy,
    Direction,
    GridEvents,
    GridKey,
    GridOptions,
    GridSnapshot,
    GridView,
};

#[cfg(feature = "serde")]
pub use crate::GridDocument;
