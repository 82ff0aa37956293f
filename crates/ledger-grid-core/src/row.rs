//! Row types

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::column::ColumnId;
use crate::error::{Error, Result};
use crate::value::{CellValue, EMPTY};

/// Unique key of a row within the whole tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RowId(String);

impl RowId {
    /// Create a new row id
    pub fn new<S: Into<String>>(id: S) -> Self {
        RowId(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RowId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RowId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::new(s)
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        RowId(s)
    }
}

/// A row's own storage: column id to raw value
///
/// Lookups of unknown columns yield [`CellValue::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RowData(BTreeMap<ColumnId, CellValue>);

impl RowData {
    /// Create an empty data map
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for a column, `Empty` if absent
    pub fn get(&self, column: impl AsRef<str>) -> &CellValue {
        self.0.get(column.as_ref()).unwrap_or(&EMPTY)
    }

    /// Check whether a value is stored for the column
    pub fn contains(&self, column: impl AsRef<str>) -> bool {
        self.0.contains_key(column.as_ref())
    }

    /// Store a value, returning the previous one
    pub fn set<K: Into<ColumnId>, V: Into<CellValue>>(
        &mut self,
        column: K,
        value: V,
    ) -> Option<CellValue> {
        self.0.insert(column.into(), value.into())
    }

    /// Remove a stored value
    pub fn remove(&mut self, column: impl AsRef<str>) -> Option<CellValue> {
        self.0.remove(column.as_ref())
    }

    /// Iterate stored values in column id order
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnId, &CellValue)> {
        self.0.iter()
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<ColumnId>, V: Into<CellValue>> FromIterator<(K, V)> for RowData {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        RowData(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One line of the (possibly hierarchical) grid
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// Unique id within the whole tree
    pub id: RowId,
    /// Display name shown in the label column
    pub label: String,
    /// Depth hint (0 = root); recomputed by flattening
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: usize,
    /// Owning row, filled in by flattening
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub parent_id: Option<RowId>,
    /// Collapsible header with children
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_group: bool,
    /// Row's own values
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: RowData,
    /// Ordered child rows (groups only)
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<Row>,
}

impl Row {
    /// Create a data row
    pub fn leaf<I: Into<RowId>, S: Into<String>>(id: I, label: S) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            level: 0,
            parent_id: None,
            is_group: false,
            data: RowData::new(),
            children: Vec::new(),
        }
    }

    /// Create a group row with children
    pub fn group<I: Into<RowId>, S: Into<String>>(id: I, label: S, children: Vec<Row>) -> Self {
        Self {
            is_group: true,
            children,
            ..Self::leaf(id, label)
        }
    }

    /// Set a data value
    pub fn with_value<K: Into<ColumnId>, V: Into<CellValue>>(mut self, column: K, value: V) -> Self {
        self.data.set(column, value);
        self
    }

    /// Set the depth hint
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    /// Get the stored value for a column, `Empty` if absent
    pub fn value(&self, column: impl AsRef<str>) -> &CellValue {
        self.data.get(column)
    }

    /// Check if the row has children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Visit this row and all descendants in depth-first pre-order
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Row)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Check the forest invariants: unique ids and children only on groups
pub fn validate_forest(roots: &[Row]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&Row> = roots.iter().rev().collect();

    while let Some(row) = stack.pop() {
        if !seen.insert(row.id.as_str()) {
            return Err(Error::DuplicateRowId(row.id.to_string()));
        }
        if !row.is_group && row.has_children() {
            return Err(Error::ChildrenOnLeaf(row.id.to_string()));
        }
        stack.extend(row.children.iter().rev());
    }

    Ok(())
}

/// Count every row in the forest
pub fn count_rows(roots: &[Row]) -> usize {
    let mut count = 0;
    for root in roots {
        root.walk(&mut |_| count += 1);
    }
    count
}
