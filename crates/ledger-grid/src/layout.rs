//! Column layout: widths, interactive resize, frozen partition
//!
//! Every visible column carries a resize handle on its right edge, except
//! the first one when at least one column is frozen. A drag sets `width = max(min_width, start_width + dx)`, with
//! no upper bound. Only one drag can be active; it is tracked either by the
//! layout's own active-drag slot (event-driven use) or by a [`ResizeGuard`]
//! that ends the drag when dropped.

use ahash::{AHashMap, AHashSet};
use ledger_grid_core::{Column, ColumnId};

/// Drag in progress
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveResize {
    /// Column being resized
    pub column_id: ColumnId,
    /// Pointer x when the drag started
    pub start_x: f64,
    /// Column width when the drag started
    pub start_width: f64,
}

impl ActiveResize {
    /// Width for a pointer at `x`, never below `min_width`
    pub fn width_at(&self, x: f64, min_width: f64) -> f64 {
        min_width.max(self.start_width + (x - self.start_x))
    }
}

/// Per-column pixel widths and resize tracking
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    widths: AHashMap<ColumnId, f64>,
    /// Column ids in declaration order, used to detect a new column set
    order: Vec<ColumnId>,
    hidden: AHashSet<ColumnId>,
    frozen_columns: usize,
    /// First frozen column, which has no handle
    fixed: Option<ColumnId>,
    default_width: f64,
    min_width: f64,
    active: Option<ActiveResize>,
}

impl ColumnLayout {
    /// Initialize widths from each column's declared width or the default
    pub fn new(
        columns: &[Column],
        frozen_columns: usize,
        default_width: f64,
        min_width: f64,
    ) -> Self {
        let mut layout = Self {
            widths: AHashMap::new(),
            order: Vec::new(),
            hidden: AHashSet::new(),
            frozen_columns,
            fixed: None,
            default_width,
            min_width,
            active: None,
        };
        layout.reset(columns);
        layout
    }

    fn reset(&mut self, columns: &[Column]) {
        self.widths = columns
            .iter()
            .map(|c| (c.id.clone(), c.width.unwrap_or(self.default_width)))
            .collect();
        self.order = columns.iter().map(|c| c.id.clone()).collect();
        self.track_visibility(columns);
        self.active = None;
    }

    fn track_visibility(&mut self, columns: &[Column]) {
        self.hidden = columns
            .iter()
            .filter(|c| c.hidden)
            .map(|c| c.id.clone())
            .collect();
        self.fixed = if self.frozen_columns > 0 {
            columns.iter().find(|c| !c.hidden).map(|c| c.id.clone())
        } else {
            None
        };
    }

    /// Adopt a new column list
    ///
    /// Widths survive when the column ids (and their order) are unchanged;
    /// any other change rebuilds them from the declared widths. Returns
    /// whether the widths were rebuilt.
    pub fn sync_columns(&mut self, columns: &[Column]) -> bool {
        let same = self.order.len() == columns.len()
            && self.order.iter().zip(columns).all(|(id, c)| *id == c.id);
        if same {
            self.track_visibility(columns);
            if self
                .active
                .as_ref()
                .is_some_and(|a| !self.has_resize_handle(&a.column_id))
            {
                self.active = None;
            }
            return false;
        }
        tracing::debug!(columns = columns.len(), "column set changed, resetting widths");
        self.reset(columns);
        true
    }

    /// Current width of a column (the default for unknown ids)
    pub fn width(&self, column_id: impl AsRef<str>) -> f64 {
        self.widths
            .get(column_id.as_ref())
            .copied()
            .unwrap_or(self.default_width)
    }

    /// Set a width directly, clamped to the minimum; unknown ids are ignored
    pub fn set_width(&mut self, column_id: impl AsRef<str>, width: f64) -> bool {
        match self.widths.get_mut(column_id.as_ref()) {
            Some(w) => {
                *w = self.min_width.max(width);
                true
            }
            None => false,
        }
    }

    /// Lower bound for resize
    pub fn min_width(&self) -> f64 {
        self.min_width
    }

    /// Number of frozen columns this layout was built for
    pub fn frozen_columns(&self) -> usize {
        self.frozen_columns
    }

    /// Check if a column shows a resize handle
    ///
    /// Hidden columns never do, nor does the first frozen column.
    pub fn has_resize_handle(&self, column_id: impl AsRef<str>) -> bool {
        let id = column_id.as_ref();
        self.widths.contains_key(id)
            && !self.hidden.contains(id)
            && self.fixed.as_ref().map(ColumnId::as_str) != Some(id)
    }

    /// Column currently being resized
    pub fn resizing(&self) -> Option<&ColumnId> {
        self.active.as_ref().map(|a| &a.column_id)
    }

    /// The drag in progress, if any
    pub fn active_resize(&self) -> Option<&ActiveResize> {
        self.active.as_ref()
    }

    /// Start a drag on a column's handle
    ///
    /// Replaces any drag already in progress. Ignored for columns without a
    /// handle.
    pub fn start_resize(&mut self, column_id: &ColumnId, pointer_x: f64) -> bool {
        if !self.has_resize_handle(column_id) {
            return false;
        }
        let start_width = self.width(column_id);
        tracing::debug!(column = %column_id, start_width, "column resize started");
        self.active = Some(ActiveResize {
            column_id: column_id.clone(),
            start_x: pointer_x,
            start_width,
        });
        true
    }

    /// Apply a pointer move to the active drag; returns the new width
    pub fn drag_to(&mut self, pointer_x: f64) -> Option<f64> {
        let active = self.active.as_ref()?;
        let width = active.width_at(pointer_x, self.min_width);
        tracing::trace!(column = %active.column_id, width, "column resize");
        let id = active.column_id.clone();
        self.widths.insert(id, width);
        Some(width)
    }

    /// Stop tracking the drag; the last width stays
    pub fn end_resize(&mut self) -> Option<(ColumnId, f64)> {
        let active = self.active.take()?;
        let width = self.width(&active.column_id);
        tracing::debug!(column = %active.column_id, width, "column resize ended");
        Some((active.column_id, width))
    }

    /// Start a scoped drag that ends when the guard is dropped
    pub fn begin_resize(&mut self, column_id: &ColumnId, pointer_x: f64) -> Option<ResizeGuard<'_>> {
        if self.start_resize(column_id, pointer_x) {
            Some(ResizeGuard { layout: self })
        } else {
            None
        }
    }

    /// Sum of the widths of the given columns
    pub fn total_width<'a>(&self, columns: impl IntoIterator<Item = &'a Column>) -> f64 {
        columns.into_iter().map(|c| self.width(&c.id)).sum()
    }
}

/// Drag scope over a [`ColumnLayout`]
///
/// Holding the guard is the drag. Dropping it (normally or during unwinding)
/// always ends the drag, so no resize outlives its gesture.
#[derive(Debug)]
pub struct ResizeGuard<'a> {
    layout: &'a mut ColumnLayout,
}

impl ResizeGuard<'_> {
    /// Apply a pointer move; returns the new width
    pub fn drag_to(&mut self, pointer_x: f64) -> f64 {
        self.layout.drag_to(pointer_x).unwrap_or_else(|| self.layout.min_width)
    }

    /// Column being resized
    pub fn column_id(&self) -> Option<&ColumnId> {
        self.layout.resizing()
    }
}

impl Drop for ResizeGuard<'_> {
    fn drop(&mut self) {
        self.layout.end_resize();
    }
}

/// Split the visible columns into the frozen prefix and the scrollable rest
pub fn partition(columns: &[Column], frozen: usize) -> (Vec<&Column>, Vec<&Column>) {
    let visible: Vec<&Column> = columns.iter().filter(|c| !c.hidden).collect();
    let split = frozen.min(visible.len());
    let (frozen, scrollable) = visible.split_at(split);
    (frozen.to_vec(), scrollable.to_vec())
}
