//! Cell edit state machine
//!
//! At most one cell is in edit mode at a time. The editor holds the draft
//! text; the grid decides which cells may be edited and where a committed
//! value goes.
//!
//! ```text
//!   Idle --start--> Editing(row, col, draft)
//!   Editing --Enter / Blur--> Idle            (commit)
//!   Editing --Escape--> Idle                  (cancel)
//!   Editing --Tab / BackTab--> Editing(next)  (commit, then start)
//! ```

use ledger_grid_core::{parse_leading_float, CellValue, ColumnId, ColumnType, RowId};

/// Keys the grid reacts to while a cell is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKey {
    /// Commit the edit
    Enter,
    /// Discard the edit
    Escape,
    /// Commit and move to the next cell
    Tab,
    /// Commit and move to the previous cell (Shift+Tab)
    BackTab,
}

/// Traversal direction for Tab/Shift+Tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Next column, wrapping to the next row
    Forward,
    /// Previous column, wrapping to the previous row
    Backward,
}

/// The cell currently in edit mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingCell {
    /// Row being edited
    pub row_id: RowId,
    /// Column being edited
    pub column_id: ColumnId,
    /// Uncommitted text
    pub draft: String,
}

/// Edit state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    /// No cell is being edited
    #[default]
    Idle,
    /// One cell is being edited
    Editing(EditingCell),
}

/// A value ready to be handed to the commit strategy
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommit {
    /// Target row
    pub row_id: RowId,
    /// Target column
    pub column_id: ColumnId,
    /// Parsed value
    pub value: CellValue,
}

/// Holds the single in-progress edit
#[derive(Debug, Clone, Default)]
pub struct CellEditor {
    state: EditState,
}

impl CellEditor {
    /// Create an idle editor
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// The cell being edited, if any
    pub fn editing(&self) -> Option<&EditingCell> {
        match &self.state {
            EditState::Editing(cell) => Some(cell),
            EditState::Idle => None,
        }
    }

    /// Check if any cell is being edited
    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    /// Check if a specific cell is being edited
    pub fn is_editing_cell(&self, row_id: &RowId, column_id: &ColumnId) -> bool {
        self.editing()
            .is_some_and(|cell| &cell.row_id == row_id && &cell.column_id == column_id)
    }

    /// Enter edit mode, replacing any current edit
    pub fn start(&mut self, row_id: RowId, column_id: ColumnId, seed: String) {
        self.state = EditState::Editing(EditingCell {
            row_id,
            column_id,
            draft: seed,
        });
    }

    /// Replace the draft; ignored while idle
    pub fn set_draft<S: Into<String>>(&mut self, text: S) -> bool {
        match &mut self.state {
            EditState::Editing(cell) => {
                cell.draft = text.into();
                true
            }
            EditState::Idle => false,
        }
    }

    /// Leave edit mode, returning the parsed value to commit
    pub fn finish(&mut self, kind: ColumnType) -> Option<PendingCommit> {
        match std::mem::take(&mut self.state) {
            EditState::Editing(cell) => Some(PendingCommit {
                value: parse_draft(kind, &cell.draft),
                row_id: cell.row_id,
                column_id: cell.column_id,
            }),
            EditState::Idle => None,
        }
    }

    /// Leave edit mode discarding the draft; returns whether an edit was open
    pub fn cancel(&mut self) -> bool {
        matches!(std::mem::take(&mut self.state), EditState::Editing(_))
    }
}

/// Convert a committed draft into a stored value
///
/// Number and currency columns take the leading numeric prefix of the draft,
/// falling back to 0 when there is none or it is not finite, so an
/// "Infinity" draft stores 0. Every other column keeps the raw
/// text, including the empty string.
pub fn parse_draft(kind: ColumnType, draft: &str) -> CellValue {
    if kind.is_numeric() {
        let n = parse_leading_float(draft)
            .filter(|n| n.is_finite() && *n != 0.0)
            .unwrap_or(0.0);
        CellValue::Number(n)
    } else {
        CellValue::text(draft)
    }
}

/// Next cell position for Tab traversal over a `rows x columns` grid
///
/// Returns `None` at either end of the grid.
pub fn next_position(
    rows: usize,
    columns: usize,
    (row, col): (usize, usize),
    direction: Direction,
) -> Option<(usize, usize)> {
    if rows == 0 || columns == 0 || row >= rows || col >= columns {
        return None;
    }
    match direction {
        Direction::Forward if col + 1 < columns => Some((row, col + 1)),
        Direction::Forward if row + 1 < rows => Some((row + 1, 0)),
        Direction::Backward if col > 0 => Some((row, col - 1)),
        Direction::Backward if row > 0 => Some((row - 1, columns - 1)),
        _ => None,
    }
}
