//! Row id index
//!
//! Maps every row id in a forest to its child-index path from the roots, so
//! lookups by id cost O(depth) instead of a scan of the whole tree. The index
//! is rebuilt whenever the grid receives a new forest.

use ahash::AHashMap;
use ledger_grid_core::{Row, RowId};

/// Child-index path from the roots to a row
type RowPath = Vec<usize>;

/// Id to path index over one version of a forest
#[derive(Debug, Clone, Default)]
pub struct RowIndex {
    paths: AHashMap<RowId, RowPath>,
}

impl RowIndex {
    /// Build the index for a forest
    pub fn build(roots: &[Row]) -> Self {
        let mut paths = AHashMap::new();
        let mut stack: Vec<(&Row, RowPath)> = roots
            .iter()
            .enumerate()
            .map(|(i, row)| (row, vec![i]))
            .collect();

        while let Some((row, path)) = stack.pop() {
            for (i, child) in row.children.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(i);
                stack.push((child, child_path));
            }
            // First occurrence wins; duplicates are rejected by validation
            paths.entry(row.id.clone()).or_insert(path);
        }

        Self { paths }
    }

    /// Number of indexed rows
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Check if a row id is present
    pub fn contains(&self, id: impl AsRef<str>) -> bool {
        self.paths.contains_key(id.as_ref())
    }

    /// Depth of a row (0 = root)
    pub fn depth_of(&self, id: impl AsRef<str>) -> Option<usize> {
        self.paths.get(id.as_ref()).map(|path| path.len() - 1)
    }

    /// Find a row in the forest this index was built from
    pub fn find<'a>(&self, roots: &'a [Row], id: impl AsRef<str>) -> Option<&'a Row> {
        let path = self.paths.get(id.as_ref())?;
        let (first, rest) = path.split_first()?;
        let mut row = roots.get(*first)?;
        for &i in rest {
            row = row.children.get(i)?;
        }
        Some(row)
    }

    /// Find a row mutably
    pub fn find_mut<'a>(&self, roots: &'a mut [Row], id: impl AsRef<str>) -> Option<&'a mut Row> {
        let path = self.paths.get(id.as_ref())?;
        let (first, rest) = path.split_first()?;
        let mut row = roots.get_mut(*first)?;
        for &i in rest {
            row = row.children.get_mut(i)?;
        }
        Some(row)
    }

    /// Owning row of `id`, `None` for roots and unknown ids
    pub fn parent_of<'a>(&self, roots: &'a [Row], id: impl AsRef<str>) -> Option<&'a Row> {
        let path = self.paths.get(id.as_ref())?;
        let (_, parent_path) = path.split_last()?;
        let (first, rest) = parent_path.split_first()?;
        let mut row = roots.get(*first)?;
        for &i in rest {
            row = row.children.get(i)?;
        }
        Some(row)
    }
}
