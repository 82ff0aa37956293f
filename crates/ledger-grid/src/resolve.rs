//! Derived-value resolution
//!
//! Decides what a cell shows: a formula column's computed value, or the
//! row's stored value for the column. The same raw value seeds an edit;
//! currency formatting only applies to the display text.

use std::borrow::Cow;

use ledger_grid_core::{CellValue, Column, ColumnType, CurrencyFormatter, Row, PLACEHOLDER};

/// Raw value of a cell
///
/// Formula columns are evaluated with the row and the full top-level row
/// list, and their result is used verbatim. Other columns read the row's
/// data, with missing values resolving to [`CellValue::Empty`].
pub fn resolve<'a>(row: &'a Row, column: &Column, roots: &[Row]) -> Cow<'a, CellValue> {
    match &column.formula {
        Some(formula) => Cow::Owned(formula.evaluate(row, roots)),
        None => Cow::Borrowed(row.value(&column.id)),
    }
}

/// Display text of a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCell {
    /// Text to draw
    pub text: String,
    /// The text is the blank-cell placeholder
    pub is_placeholder: bool,
}

impl DisplayCell {
    fn text(text: String) -> Self {
        Self {
            text,
            is_placeholder: false,
        }
    }

    fn placeholder() -> Self {
        Self {
            text: PLACEHOLDER.to_string(),
            is_placeholder: true,
        }
    }
}

/// Format a resolved value for display in `column`
pub fn display_value(
    value: &CellValue,
    column: &Column,
    formatter: &dyn CurrencyFormatter,
) -> DisplayCell {
    match value {
        CellValue::Number(n) if column.kind == ColumnType::Currency => {
            DisplayCell::text(formatter.format_amount(*n))
        }
        v if v.is_blank() => DisplayCell::placeholder(),
        v => DisplayCell::text(v.to_string()),
    }
}

/// Resolve and format a cell in one step
pub fn display(
    row: &Row,
    column: &Column,
    roots: &[Row],
    formatter: &dyn CurrencyFormatter,
) -> DisplayCell {
    display_value(&resolve(row, column, roots), column, formatter)
}
