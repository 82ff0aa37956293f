//! JSON grid documents
//!
//! A document bundles the column definitions, the row forest and the grid
//! options so a whole grid can be stored and reloaded.

use std::fs;
use std::path::Path;

use ledger_grid_core::{validate_columns, validate_forest, Column, Error, Result, Row};
use serde::{Deserialize, Serialize};

use crate::commit::CommitStrategy;
use crate::options::GridOptions;
use crate::view::GridView;

/// A serialized grid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridDocument {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub options: GridOptions,
}

impl GridDocument {
    /// Bundle a grid's parts
    pub fn new(columns: Vec<Column>, rows: Vec<Row>, options: GridOptions) -> Self {
        Self {
            columns,
            rows,
            options,
        }
    }

    /// Parse and validate a document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json).map_err(|e| Error::Document(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Read and validate a document file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = json.len(), "read grid document");
        Self::from_json_str(&json)
    }

    /// Pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Document(e.to_string()))
    }

    /// Write the document as pretty-printed JSON
    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        fs::write(path, &json)?;
        tracing::debug!(path = %path.display(), bytes = json.len(), "wrote grid document");
        Ok(())
    }

    /// Check options, column ids and the row forest
    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;
        validate_columns(&self.columns)?;
        validate_forest(&self.rows)
    }

    /// Build a grid from the document
    pub fn into_view(self, strategy: CommitStrategy) -> Result<GridView> {
        GridView::new(self.columns, self.rows, self.options, strategy)
    }

    /// Capture a grid's current columns, rows and options
    pub fn from_view(view: &GridView) -> Self {
        Self::new(
            view.columns().to_vec(),
            view.rows().to_vec(),
            view.options().clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_grid_core::{CellValue, ColumnType, Formula};

    const DOC: &str = r#"{
        "columns": [
            {"id": "account", "label": "ACCOUNT", "editable": false},
            {"id": "jan", "label": "JAN", "type": "currency", "width": 120},
            {"id": "total", "label": "TOTAL", "type": "currency", "editable": false,
             "formula": {"sum_of": {"columns": ["jan"]}}}
        ],
        "rows": [
            {"id": "income", "label": "Income", "is_group": true, "children": [
                {"id": "sales", "label": "Sales", "data": {"jan": 100}},
                {"id": "fees", "label": "Fees", "data": {"jan": 200}}
            ]}
        ],
        "options": {"frozen_columns": 2}
    }"#;

    #[test]
    fn test_parse_document() {
        let doc = GridDocument::from_json_str(DOC).unwrap();
        assert_eq!(doc.columns.len(), 3);
        assert_eq!(doc.columns[1].kind, ColumnType::Currency);
        assert_eq!(doc.columns[1].width, Some(120.0));
        assert!(doc.columns[2].formula.is_some());
        assert_eq!(doc.options.frozen_columns, 2);
        assert_eq!(doc.options.min_column_width, 100.0);

        let view = doc.into_view(CommitStrategy::SelfManaged).unwrap();
        assert_eq!(view.cell_value("income", "total"), Some(CellValue::Number(300.0)));
    }

    #[test]
    fn test_malformed_json() {
        let err = GridDocument::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Document(_)));
    }

    #[test]
    fn test_rejects_duplicate_rows() {
        let json = r#"{"columns": [], "rows": [
            {"id": "a", "label": "A"}, {"id": "a", "label": "again"}
        ]}"#;
        assert!(matches!(
            GridDocument::from_json_str(json),
            Err(Error::DuplicateRowId(id)) if id == "a"
        ));
    }

    #[test]
    fn test_custom_formula_not_written() {
        let doc = GridDocument::new(
            vec![Column::new("x", "X").with_formula(Formula::custom(|_, _| CellValue::Empty))],
            vec![],
            GridOptions::default(),
        );
        let json = doc.to_json_string().unwrap();
        assert!(!json.contains("formula"));
    }

    #[test]
    fn test_date_and_text_values() {
        let json = r#"{"columns": [{"id": "due", "label": "DUE", "type": "date"}], "rows": [
            {"id": "a", "label": "A", "data": {"due": {"date": "2022-04-01"}}},
            {"id": "b", "label": "B", "data": {"due": "2022-04-01"}}
        ]}"#;
        let doc = GridDocument::from_json_str(json).unwrap();
        assert_eq!(doc.rows[0].value("due").type_name(), "date");
        assert_eq!(doc.rows[1].value("due"), &CellValue::text("2022-04-01"));

        let written = doc.to_json_string().unwrap();
        assert!(written.contains(r#""date": "2022-04-01""#));
        assert_eq!(GridDocument::from_json_str(&written).unwrap().rows, doc.rows);
    }

    #[test]
    fn test_rejects_total_of_unknown_column() {
        let json = r#"{"columns": [
            {"id": "total", "label": "TOTAL", "formula": {"sum_of": {"columns": ["jan"]}}}
        ]}"#;
        assert!(matches!(
            GridDocument::from_json_str(json),
            Err(Error::UnknownColumn { missing, .. }) if missing == "jan"
        ));
    }
}
