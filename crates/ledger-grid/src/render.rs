//! Renderer-agnostic grid snapshot
//!
//! [`GridView::snapshot`](crate::GridView::snapshot) resolves everything a
//! renderer needs (visible rows in order, display text, widths, frozen
//! split, edit and expansion flags) so drawing code holds no grid logic.

use ledger_grid_core::{Column, ColumnId, ColumnType, RowId};

use crate::flatten::FlatRow;
use crate::layout::partition;
use crate::resolve::display;
use crate::view::GridView;

/// Toolbar actions offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolbar {
    /// "Add row" is shown
    pub add_row: bool,
    /// "Add column" is shown
    pub add_column: bool,
}

/// One header cell
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    /// Column this header belongs to
    pub column_id: ColumnId,
    /// Header text
    pub label: String,
    /// Column type, for alignment
    pub kind: ColumnType,
    /// Current width in pixels
    pub width: f64,
    /// Drawn in the fixed left region
    pub frozen: bool,
    /// A resize handle is drawn on the right edge
    pub resizable: bool,
}

/// One body cell
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCell {
    /// Column of the cell
    pub column_id: ColumnId,
    /// Display text (formatted, or the placeholder)
    pub text: String,
    /// `text` is the blank-cell placeholder
    pub is_placeholder: bool,
    /// This cell is in edit mode; draw the draft instead of `text`
    pub editing: bool,
    /// A click may start editing this cell
    pub editable: bool,
    /// Drawn in the fixed left region
    pub frozen: bool,
    /// Same as the header width
    pub width: f64,
}

/// One visible row
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    /// Row id
    pub id: RowId,
    /// Label drawn in the first column
    pub label: String,
    /// Depth in the tree (0 = root)
    pub level: usize,
    /// Left padding of the label column in pixels
    pub indent: f64,
    /// Group rows draw an expand/collapse toggle
    pub is_group: bool,
    /// Group is expanded (always false for data rows)
    pub expanded: bool,
    /// A delete action is offered (data rows only, when deletion is wired)
    pub deletable: bool,
    /// Cells in header order
    pub cells: Vec<RenderedCell>,
}

/// Everything needed to draw the grid once
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    /// Toolbar actions to offer
    pub toolbar: Toolbar,
    /// Visible columns, frozen ones first
    pub header: Vec<HeaderCell>,
    /// Visible rows in display order
    pub rows: Vec<RenderedRow>,
    /// Combined width of the frozen columns
    pub frozen_width: f64,
    /// Combined width of all visible columns
    pub total_width: f64,
    /// Draft text of the cell in edit mode
    pub draft: Option<String>,
}

impl GridSnapshot {
    /// Nothing to show; renderers offer "add first row" instead
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find a rendered cell
    pub fn cell(&self, row_id: &str, column_id: &str) -> Option<&RenderedCell> {
        self.rows
            .iter()
            .find(|r| r.id.as_str() == row_id)?
            .cells
            .iter()
            .find(|c| c.column_id.as_str() == column_id)
    }
}

pub(crate) fn build_snapshot(view: &GridView) -> GridSnapshot {
    let options = view.options();
    let layout = view.layout();
    let (frozen, scrollable) = partition(view.columns(), options.frozen_columns);

    let header = frozen
        .iter()
        .map(|c| (c, true))
        .chain(scrollable.iter().map(|c| (c, false)))
        .map(|(c, is_frozen)| HeaderCell {
            column_id: c.id.clone(),
            label: c.label.clone(),
            kind: c.kind,
            width: layout.width(&c.id),
            frozen: is_frozen,
            resizable: layout.has_resize_handle(&c.id),
        })
        .collect();

    let rows = view
        .flattened()
        .iter()
        .map(|flat| render_row(view, flat, &frozen, &scrollable))
        .collect();

    GridSnapshot {
        toolbar: view.toolbar(),
        header,
        rows,
        frozen_width: layout.total_width(frozen.iter().copied()),
        total_width: layout.total_width(frozen.iter().chain(scrollable.iter()).copied()),
        draft: view.draft().map(str::to_string),
    }
}

fn render_row(
    view: &GridView,
    flat: &FlatRow<'_>,
    frozen: &[&Column],
    scrollable: &[&Column],
) -> RenderedRow {
    let row = flat.row;
    let layout = view.layout();

    let cells = frozen
        .iter()
        .map(|c| (*c, true))
        .chain(scrollable.iter().map(|c| (*c, false)))
        .map(|(column, is_frozen)| {
            let shown = display(row, column, view.rows(), view.formatter());
            RenderedCell {
                column_id: column.id.clone(),
                text: shown.text,
                is_placeholder: shown.is_placeholder,
                editing: view.is_editing_cell(&row.id, &column.id),
                editable: column.accepts_edits(),
                frozen: is_frozen,
                width: layout.width(&column.id),
            }
        })
        .collect();

    RenderedRow {
        id: row.id.clone(),
        label: row.label.clone(),
        level: flat.level,
        indent: flat.level as f64 * view.options().indent_per_level,
        is_group: row.is_group,
        expanded: row.is_group && view.expansion().is_expanded(&row.id),
        deletable: view.has_row_delete() && !row.is_group,
        cells,
    }
}
