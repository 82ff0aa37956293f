//! Where committed edits and structural requests go
//!
//! A grid is built in one of two commit modes:
//!
//! - **Controlled**: every committed value is handed to a
//!   [`CellChangeHandler`]; the grid leaves its rows untouched and expects
//!   the owner to supply updated rows.
//! - **Self-managed**: the grid writes committed values into its own copy of
//!   the rows, so it stays usable without an owner.
//!
//! Row/column add and delete requests are always forwarded to
//! [`GridEvents`]; the grid never changes its structure on its own.

use ledger_grid_core::{CellValue, ColumnId, RowId};

/// Receives committed cell values in controlled mode
pub trait CellChangeHandler {
    /// A cell edit was committed
    fn cell_changed(&mut self, row_id: &RowId, column_id: &ColumnId, value: CellValue);
}

impl<F> CellChangeHandler for F
where
    F: FnMut(&RowId, &ColumnId, CellValue),
{
    fn cell_changed(&mut self, row_id: &RowId, column_id: &ColumnId, value: CellValue) {
        self(row_id, column_id, value)
    }
}

/// How committed values are applied
pub enum CommitStrategy {
    /// Forward to the owner, never mutate local rows
    Controlled(Box<dyn CellChangeHandler>),
    /// Write into the grid's own rows
    SelfManaged,
}

impl CommitStrategy {
    /// Controlled mode with the given handler
    pub fn controlled<H: CellChangeHandler + 'static>(handler: H) -> Self {
        CommitStrategy::Controlled(Box::new(handler))
    }

    /// Check if this is controlled mode
    pub fn is_controlled(&self) -> bool {
        matches!(self, CommitStrategy::Controlled(_))
    }

    /// Mode name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            CommitStrategy::Controlled(_) => "controlled",
            CommitStrategy::SelfManaged => "self-managed",
        }
    }
}

impl std::fmt::Debug for CommitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural requests forwarded to the grid's owner
///
/// Every method defaults to doing nothing, so owners only implement what
/// they wire up.
pub trait GridEvents {
    /// "Add row" was requested, optionally under a parent group
    fn row_add_requested(&mut self, _parent_id: Option<&RowId>) {}

    /// Deletion of a data row was requested
    fn row_delete_requested(&mut self, _row_id: &RowId) {}

    /// "Add column" was requested
    fn column_add_requested(&mut self) {}

    /// Deletion of a column was requested
    fn column_delete_requested(&mut self, _column_id: &ColumnId) {}
}

/// Owner that ignores every structural request
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl GridEvents for NoEvents {}
