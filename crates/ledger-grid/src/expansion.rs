//! Expand/collapse state for group rows

use ahash::AHashSet;
use ledger_grid_core::{Row, RowId};

/// Set of group row ids currently expanded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpansionState {
    expanded: AHashSet<RowId>,
}

impl ExpansionState {
    /// Create an empty state (every group collapsed)
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state under the default expansion policy
    ///
    /// With `default_expanded`, every group anywhere in the forest starts
    /// expanded (nested groups included); otherwise nothing is expanded.
    pub fn initial(roots: &[Row], default_expanded: bool) -> Self {
        if default_expanded {
            Self::all_expanded(roots)
        } else {
            Self::new()
        }
    }

    /// State with every group in the forest expanded
    pub fn all_expanded(roots: &[Row]) -> Self {
        let mut state = Self::new();
        state.expand_all(roots);
        state
    }

    /// Check if a row is expanded
    pub fn is_expanded(&self, id: impl AsRef<str>) -> bool {
        self.expanded.contains(id.as_ref())
    }

    /// Flip a row's membership; returns the new expanded flag
    pub fn toggle(&mut self, id: &RowId) -> bool {
        if self.expanded.remove(id.as_str()) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Expand a row
    pub fn expand(&mut self, id: &RowId) {
        self.expanded.insert(id.clone());
    }

    /// Collapse a row
    pub fn collapse(&mut self, id: &RowId) {
        self.expanded.remove(id.as_str());
    }

    /// Expand every group in the forest
    pub fn expand_all(&mut self, roots: &[Row]) {
        for root in roots {
            root.walk(&mut |row| {
                if row.is_group {
                    self.expanded.insert(row.id.clone());
                }
            });
        }
    }

    /// Collapse everything
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Number of expanded rows
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Check if nothing is expanded
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Iterate expanded ids (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.expanded.iter()
    }
}

impl FromIterator<RowId> for ExpansionState {
    fn from_iter<T: IntoIterator<Item = RowId>>(iter: T) -> Self {
        Self {
            expanded: iter.into_iter().collect(),
        }
    }
}

/// Ids of every group row in the forest
pub(crate) fn group_ids(roots: &[Row]) -> AHashSet<RowId> {
    let mut ids = AHashSet::new();
    for root in roots {
        root.walk(&mut |row| {
            if row.is_group {
                ids.insert(row.id.clone());
            }
        });
    }
    ids
}
