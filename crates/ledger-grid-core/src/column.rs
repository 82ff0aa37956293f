//! Column types

use std::borrow::Borrow;
use std::fmt;

use crate::formula::Formula;

/// Unique key of a column, also used to index a row's data
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ColumnId(String);

impl ColumnId {
    /// Create a new column id
    pub fn new<S: Into<String>>(id: S) -> Self {
        ColumnId(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ColumnId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ColumnId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        ColumnId::new(s)
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        ColumnId(s)
    }
}

/// How a column's values are formatted and parsed back after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnType {
    /// Free text
    #[default]
    Text,
    /// Plain number
    Number,
    /// Monetary amount, formatted with the currency formatter
    Currency,
    /// Calendar date
    Date,
    /// Choice from a list (stored as text)
    Select,
}

impl ColumnType {
    /// Whether committed drafts are parsed into numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Number | ColumnType::Currency)
    }
}

/// One vertical slice of the grid
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Unique id, used to look up row data
    pub id: ColumnId,
    /// Header text
    pub label: String,
    /// Value type
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: ColumnType,
    /// Initial pixel width (None = grid default)
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub width: Option<f64>,
    /// Cells accept direct edits unless this is explicitly false
    #[cfg_attr(feature = "serde", serde(default = "default_editable"))]
    pub editable: bool,
    /// Column is hidden from rendering and traversal
    #[cfg_attr(feature = "serde", serde(default))]
    pub hidden: bool,
    /// Derived value, overrides stored data on display
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Formula::is_absent_or_custom")
    )]
    pub formula: Option<Formula>,
}

#[cfg(feature = "serde")]
fn default_editable() -> bool {
    true
}

impl Column {
    /// Create a new editable text column
    pub fn new<I: Into<ColumnId>, S: Into<String>>(id: I, label: S) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ColumnType::Text,
            width: None,
            editable: true,
            hidden: false,
            formula: None,
        }
    }

    /// Set the column type
    pub fn with_type(mut self, kind: ColumnType) -> Self {
        self.kind = kind;
        self
    }

    /// Set the initial width
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set whether cells can be edited
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Set hidden
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Attach a formula
    pub fn with_formula(mut self, formula: Formula) -> Self {
        self.formula = Some(formula);
        self
    }

    /// Check if the column's value is computed
    pub fn is_derived(&self) -> bool {
        self.formula.is_some()
    }

    /// Check if a cell in this column may enter edit mode
    pub fn accepts_edits(&self) -> bool {
        self.editable && !self.hidden
    }
}

/// Ensure column ids are unique and every total reads a known column
pub fn validate_columns(columns: &[Column]) -> crate::Result<()> {
    let mut seen = std::collections::HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.id.as_str()) {
            return Err(crate::Error::DuplicateColumnId(column.id.to_string()));
        }
    }
    for column in columns {
        let deps = column.formula.as_ref().and_then(|f| f.dependencies());
        if let Some(missing) = deps.into_iter().flatten().find(|d| !seen.contains(d.as_str())) {
            return Err(crate::Error::UnknownColumn {
                column: column.id.to_string(),
                missing: missing.to_string(),
            });
        }
    }
    Ok(())
}
