//! The grid view
//!
//! [`GridView`] owns the column definitions, the row forest and all
//! interaction state (expansion, the single in-progress edit, column widths)
//! and routes committed values through its [`CommitStrategy`].

use ahash::AHashSet;
use ledger_grid_core::{
    validate_columns, validate_forest, CellValue, Column, ColumnId, CurrencyFormat,
    CurrencyFormatter, Result, Row, RowId,
};

use crate::commit::{CellChangeHandler, CommitStrategy, GridEvents, NoEvents};
use crate::edit::{next_position, CellEditor, Direction, EditState, GridKey, PendingCommit};
use crate::expansion::{group_ids, ExpansionState};
use crate::flatten::{flatten, FlatRow};
use crate::index::RowIndex;
use crate::layout::{partition, ColumnLayout, ResizeGuard};
use crate::options::GridOptions;
use crate::render::{build_snapshot, GridSnapshot, Toolbar};
use crate::resolve::{display, resolve, DisplayCell};

/// Hierarchical editable grid
///
/// # Example
///
/// ```rust
/// use ledger_grid::prelude::*;
///
/// let columns = vec![
///     Column::new("account", "ACCOUNT"),
///     Column::new("jan", "JAN").with_type(ColumnType::Currency),
/// ];
/// let rows = vec![Row::group(
///     "income",
///     "Income",
///     vec![Row::leaf("sales", "Sales").with_value("jan", 100.0)],
/// )];
///
/// let mut grid = GridView::self_managed(columns, rows, GridOptions::default())?;
/// grid.toggle_expansion(&"income".into());
///
/// assert!(grid.start_editing(&"sales".into(), &"jan".into()));
/// grid.set_draft("150");
/// grid.handle_key(GridKey::Enter);
///
/// assert_eq!(grid.cell_value("sales", "jan"), Some(CellValue::Number(150.0)));
/// # Ok::<(), ledger_grid::Error>(())
/// ```
pub struct GridView {
    columns: Vec<Column>,
    rows: Vec<Row>,
    index: RowIndex,
    groups: AHashSet<RowId>,
    options: GridOptions,
    expansion: ExpansionState,
    editor: CellEditor,
    layout: ColumnLayout,
    strategy: CommitStrategy,
    events: Box<dyn GridEvents>,
    formatter: Box<dyn CurrencyFormatter>,
    row_delete_wired: bool,
}

impl GridView {
    /// Create a grid with an explicit commit strategy
    pub fn new(
        columns: Vec<Column>,
        rows: Vec<Row>,
        options: GridOptions,
        strategy: CommitStrategy,
    ) -> Result<Self> {
        options.validate()?;
        validate_columns(&columns)?;
        validate_forest(&rows)?;

        let layout = ColumnLayout::new(
            &columns,
            options.frozen_columns,
            options.default_column_width,
            options.min_column_width,
        );
        let expansion = ExpansionState::initial(&rows, options.default_expanded);
        tracing::debug!(
            columns = columns.len(),
            roots = rows.len(),
            mode = strategy.name(),
            "grid created"
        );

        Ok(Self {
            index: RowIndex::build(&rows),
            groups: group_ids(&rows),
            columns,
            rows,
            options,
            expansion,
            editor: CellEditor::new(),
            layout,
            strategy,
            events: Box::new(NoEvents),
            formatter: Box::new(CurrencyFormat::default()),
            row_delete_wired: false,
        })
    }

    /// Create a grid whose owner receives every committed value
    pub fn controlled<H: CellChangeHandler + 'static>(
        columns: Vec<Column>,
        rows: Vec<Row>,
        options: GridOptions,
        handler: H,
    ) -> Result<Self> {
        Self::new(columns, rows, options, CommitStrategy::controlled(handler))
    }

    /// Create a grid that writes committed values into its own rows
    pub fn self_managed(columns: Vec<Column>, rows: Vec<Row>, options: GridOptions) -> Result<Self> {
        Self::new(columns, rows, options, CommitStrategy::SelfManaged)
    }

    /// Route structural requests to `events`
    ///
    /// Row deletion is offered in snapshots once an owner is attached.
    pub fn with_events<E: GridEvents + 'static>(mut self, events: E) -> Self {
        self.events = Box::new(events);
        self.row_delete_wired = true;
        self
    }

    /// Format currency cells with `formatter`
    pub fn with_formatter<F: CurrencyFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    // ---- data ----

    /// Column definitions, hidden ones included
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Visible columns in display order
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| !c.hidden).collect()
    }

    /// Look up a column
    pub fn column(&self, id: impl AsRef<str>) -> Option<&Column> {
        let id = id.as_ref();
        self.columns.iter().find(|c| c.id.as_str() == id)
    }

    /// The row forest
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Look up a row anywhere in the forest
    pub fn row(&self, id: impl AsRef<str>) -> Option<&Row> {
        self.index.find(&self.rows, id)
    }

    /// Owning row of `id`
    pub fn parent_of(&self, id: impl AsRef<str>) -> Option<&Row> {
        self.index.parent_of(&self.rows, id)
    }

    /// Options the grid was built with
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Commit mode
    pub fn strategy(&self) -> &CommitStrategy {
        &self.strategy
    }

    /// Formatter used for currency cells
    pub fn formatter(&self) -> &dyn CurrencyFormatter {
        self.formatter.as_ref()
    }

    /// Replace the row forest
    ///
    /// This is how a controlled owner supplies updated rows. Expansion state
    /// survives when the set of group ids is unchanged and is otherwise reset
    /// to the default policy. An edit on a row that no longer exists is
    /// dropped.
    pub fn set_rows(&mut self, rows: Vec<Row>) -> Result<()> {
        validate_forest(&rows)?;

        let groups = group_ids(&rows);
        if groups != self.groups {
            tracing::debug!(groups = groups.len(), "group set changed, resetting expansion");
            self.expansion = ExpansionState::initial(&rows, self.options.default_expanded);
            self.groups = groups;
        }
        self.index = RowIndex::build(&rows);
        self.rows = rows;
        tracing::debug!(rows = self.index.len(), "rows replaced");

        if let Some(cell) = self.editor.editing() {
            if !self.index.contains(&cell.row_id) {
                tracing::debug!(row = %cell.row_id, "edited row vanished, cancelling edit");
                self.editor.cancel();
            }
        }
        Ok(())
    }

    /// Replace the column definitions
    ///
    /// Widths survive when the column ids are unchanged. An edit on a column
    /// that no longer accepts edits is dropped.
    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<()> {
        validate_columns(&columns)?;
        self.layout.sync_columns(&columns);
        self.columns = columns;
        tracing::debug!(columns = self.columns.len(), "columns replaced");

        if let Some(cell) = self.editor.editing() {
            let editable = self.column(&cell.column_id).is_some_and(Column::accepts_edits);
            if !editable {
                tracing::debug!(column = %cell.column_id, "edited column gone, cancelling edit");
                self.editor.cancel();
            }
        }
        Ok(())
    }

    // ---- tree ----

    /// Visible rows in display order
    pub fn flattened(&self) -> Vec<FlatRow<'_>> {
        flatten(&self.rows, &self.expansion)
    }

    /// No rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Expansion state
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Check if a group is expanded
    pub fn is_expanded(&self, row_id: impl AsRef<str>) -> bool {
        self.expansion.is_expanded(row_id)
    }

    /// Flip a group's expansion
    ///
    /// Returns the new state, or `None` when `row_id` is not a group.
    pub fn toggle_expansion(&mut self, row_id: &RowId) -> Option<bool> {
        if !self.groups.contains(row_id.as_str()) {
            return None;
        }
        let expanded = self.expansion.toggle(row_id);
        tracing::debug!(row = %row_id, expanded, "expansion toggled");
        Some(expanded)
    }

    /// Expand every group
    pub fn expand_all(&mut self) {
        self.expansion.expand_all(&self.rows);
        tracing::debug!(expanded = self.expansion.len(), "expanded all groups");
    }

    /// Collapse every group
    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
        tracing::debug!("collapsed all groups");
    }

    // ---- values ----

    /// Resolved value of a cell (formula result or stored value)
    pub fn cell_value(&self, row_id: impl AsRef<str>, column_id: impl AsRef<str>) -> Option<CellValue> {
        let row = self.row(row_id)?;
        let column = self.column(column_id)?;
        Some(resolve(row, column, &self.rows).into_owned())
    }

    /// Display text of a cell
    pub fn cell_display(
        &self,
        row_id: impl AsRef<str>,
        column_id: impl AsRef<str>,
    ) -> Option<DisplayCell> {
        let row = self.row(row_id)?;
        let column = self.column(column_id)?;
        Some(display(row, column, &self.rows, self.formatter()))
    }

    // ---- editing ----

    /// Edit state
    pub fn edit_state(&self) -> &EditState {
        self.editor.state()
    }

    /// Check if any cell is being edited
    pub fn is_editing(&self) -> bool {
        self.editor.is_editing()
    }

    /// Check if a specific cell is being edited
    pub fn is_editing_cell(&self, row_id: &RowId, column_id: &ColumnId) -> bool {
        self.editor.is_editing_cell(row_id, column_id)
    }

    /// Draft text of the edited cell
    pub fn draft(&self) -> Option<&str> {
        self.editor.editing().map(|cell| cell.draft.as_str())
    }

    /// Put a cell in edit mode
    ///
    /// Ignored (returning `false`) for unknown ids and for columns that are
    /// hidden or not editable. A cell already in edit mode is committed
    /// first, as if it lost focus. The draft is seeded from the cell's
    /// resolved value.
    pub fn start_editing(&mut self, row_id: &RowId, column_id: &ColumnId) -> bool {
        let editable = self.column(column_id).is_some_and(Column::accepts_edits);
        if !editable || !self.index.contains(row_id) {
            return false;
        }
        if self.editor.is_editing() && !self.editor.is_editing_cell(row_id, column_id) {
            self.commit();
        }

        let seed = match (self.row(row_id), self.column(column_id)) {
            (Some(row), Some(column)) => resolve(row, column, &self.rows).to_edit_string(),
            _ => return false,
        };
        tracing::debug!(row = %row_id, column = %column_id, "edit started");
        self.editor.start(row_id.clone(), column_id.clone(), seed);
        true
    }

    /// Replace the draft; ignored while idle
    pub fn set_draft<S: Into<String>>(&mut self, text: S) -> bool {
        self.editor.set_draft(text)
    }

    /// Route a key to the edit state machine
    ///
    /// Returns `false` when idle (the key does nothing).
    pub fn handle_key(&mut self, key: GridKey) -> bool {
        if !self.editor.is_editing() {
            return false;
        }
        match key {
            GridKey::Enter => self.commit(),
            GridKey::Escape => self.cancel_edit(),
            GridKey::Tab => self.move_edit(Direction::Forward),
            GridKey::BackTab => self.move_edit(Direction::Backward),
        }
    }

    /// The edited cell lost focus; commits like Enter
    pub fn blur(&mut self) -> bool {
        self.commit()
    }

    /// Commit the draft and leave edit mode
    pub fn commit(&mut self) -> bool {
        let Some(cell) = self.editor.editing() else {
            return false;
        };
        let Some(kind) = self.column(&cell.column_id).map(|c| c.kind) else {
            self.editor.cancel();
            return false;
        };
        match self.editor.finish(kind) {
            Some(pending) => {
                self.apply(pending);
                true
            }
            None => false,
        }
    }

    /// Discard the draft and leave edit mode
    pub fn cancel_edit(&mut self) -> bool {
        let cancelled = self.editor.cancel();
        if cancelled {
            tracing::debug!("edit cancelled");
        }
        cancelled
    }

    /// Commit, then move the edit to the neighbouring visible cell
    ///
    /// At either end of the grid the edit just ends. Landing on a column that
    /// does not accept edits also ends it.
    pub fn move_edit(&mut self, direction: Direction) -> bool {
        let Some(cell) = self.editor.editing() else {
            return false;
        };
        let (row_id, column_id) = (cell.row_id.clone(), cell.column_id.clone());
        self.commit();

        let target = {
            let rows = self.flattened();
            let columns = self.visible_columns();
            let from = rows
                .iter()
                .position(|f| f.row.id == row_id)
                .zip(columns.iter().position(|c| c.id == column_id));
            from.and_then(|pos| next_position(rows.len(), columns.len(), pos, direction))
                .and_then(|(r, c)| Some((rows.get(r)?.row.id.clone(), columns.get(c)?.id.clone())))
        };

        match target {
            Some((next_row, next_column)) => {
                let started = self.start_editing(&next_row, &next_column);
                tracing::debug!(
                    row = %next_row,
                    column = %next_column,
                    started,
                    ?direction,
                    "edit moved"
                );
            }
            None => tracing::debug!(?direction, "edit reached grid edge"),
        }
        true
    }

    fn apply(&mut self, pending: PendingCommit) {
        let PendingCommit {
            row_id,
            column_id,
            value,
        } = pending;
        tracing::debug!(
            row = %row_id,
            column = %column_id,
            value = %value,
            mode = self.strategy.name(),
            "edit committed"
        );
        match &mut self.strategy {
            CommitStrategy::Controlled(handler) => handler.cell_changed(&row_id, &column_id, value),
            CommitStrategy::SelfManaged => match self.index.find_mut(&mut self.rows, &row_id) {
                Some(row) => {
                    row.data.set(column_id, value);
                }
                None => tracing::warn!(row = %row_id, "committed row not found"),
            },
        }
    }

    // ---- column layout ----

    /// Column layout
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Current width of a column
    pub fn column_width(&self, column_id: impl AsRef<str>) -> f64 {
        self.layout.width(column_id)
    }

    /// Combined width of the frozen columns
    pub fn frozen_width(&self) -> f64 {
        let (frozen, _) = partition(&self.columns, self.options.frozen_columns);
        self.layout.total_width(frozen)
    }

    /// Combined width of the visible columns
    pub fn total_width(&self) -> f64 {
        self.layout.total_width(self.columns.iter().filter(|c| !c.hidden))
    }

    /// Pointer pressed on a column's resize handle
    pub fn pointer_down_on_handle(&mut self, column_id: &ColumnId, pointer_x: f64) -> bool {
        self.layout.start_resize(column_id, pointer_x)
    }

    /// Pointer moved; returns the resized column's new width during a drag
    pub fn pointer_move(&mut self, pointer_x: f64) -> Option<f64> {
        self.layout.drag_to(pointer_x)
    }

    /// Pointer released; ends any drag
    pub fn pointer_up(&mut self) -> Option<(ColumnId, f64)> {
        self.layout.end_resize()
    }

    /// Start a scoped drag that ends when the guard is dropped
    pub fn begin_resize(&mut self, column_id: &ColumnId, pointer_x: f64) -> Option<ResizeGuard<'_>> {
        self.layout.begin_resize(column_id, pointer_x)
    }

    // ---- structure ----

    /// Toolbar actions to offer
    pub fn toolbar(&self) -> Toolbar {
        Toolbar {
            add_row: self.options.show_add_row,
            add_column: self.options.show_add_column,
        }
    }

    pub(crate) fn has_row_delete(&self) -> bool {
        self.row_delete_wired
    }

    /// Ask the owner to add a row, optionally under a group
    ///
    /// Ignored when `parent_id` is not a group in this grid.
    pub fn request_row_add(&mut self, parent_id: Option<&RowId>) -> bool {
        if let Some(parent) = parent_id {
            if !self.groups.contains(parent.as_str()) {
                tracing::warn!(parent = %parent, "row add under a non-group ignored");
                return false;
            }
        }
        tracing::debug!(parent = ?parent_id.map(RowId::as_str), "row add requested");
        self.events.row_add_requested(parent_id);
        true
    }

    /// Ask the owner to delete a data row
    ///
    /// Group rows and unknown ids are ignored. The grid never removes the row
    /// itself.
    pub fn request_row_delete(&mut self, row_id: &RowId) -> bool {
        match self.row(row_id) {
            Some(row) if !row.is_group => {
                tracing::debug!(row = %row_id, "row delete requested");
                self.events.row_delete_requested(row_id);
                true
            }
            Some(_) => {
                tracing::warn!(row = %row_id, "delete of a group row ignored");
                false
            }
            None => {
                tracing::warn!(row = %row_id, "delete of an unknown row ignored");
                false
            }
        }
    }

    /// Ask the owner to add a column
    pub fn request_column_add(&mut self) -> bool {
        tracing::debug!("column add requested");
        self.events.column_add_requested();
        true
    }

    /// Ask the owner to delete a column; unknown ids are ignored
    pub fn request_column_delete(&mut self, column_id: &ColumnId) -> bool {
        if self.column(column_id).is_none() {
            tracing::warn!(column = %column_id, "delete of an unknown column ignored");
            return false;
        }
        tracing::debug!(column = %column_id, "column delete requested");
        self.events.column_delete_requested(column_id);
        true
    }

    // ---- output ----

    /// Everything a renderer needs, resolved
    pub fn snapshot(&self) -> GridSnapshot {
        build_snapshot(self)
    }

    /// Take the rows back out of the grid
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl std::fmt::Debug for GridView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridView")
            .field("columns", &self.columns.len())
            .field("rows", &self.index.len())
            .field("mode", &self.strategy)
            .field("editing", &self.editor.editing())
            .field("resizing", &self.layout.resizing())
            .finish()
    }
}
