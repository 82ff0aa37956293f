//! Error types for ledger-grid-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or loading a grid
///
/// Interactive operations (editing, expansion, resizing) never fail; invalid
/// requests are ignored. These errors only surface when the caller hands the
/// grid malformed input.
#[derive(Debug, Error)]
pub enum Error {
    /// Two columns share the same id
    #[error("Duplicate column id: {0}")]
    DuplicateColumnId(String),

    /// Two rows anywhere in the forest share the same id
    #[error("Duplicate row id: {0}")]
    DuplicateRowId(String),

    /// A row that is not a group carries children
    #[error("Row {0} has children but is not a group")]
    ChildrenOnLeaf(String),

    /// A formula reads a column that is not in the column list
    #[error("Column {column} reads unknown column {missing}")]
    UnknownColumn { column: String, missing: String },

    /// Grid option outside its allowed range
    #[error("Invalid grid option {name}: {reason}")]
    InvalidOption {
        name: &'static str,
        reason: String,
    },

    /// Grid document could not be parsed or serialized
    #[error("Grid document error: {0}")]
    Document(String),

    /// I/O failure while reading or writing a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid-option error
    pub fn invalid_option<S: Into<String>>(name: &'static str, reason: S) -> Self {
        Error::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}
