//! Derived column values
//!
//! A [`Formula`] computes a cell's displayed value from the row (and, for
//! group rows, its children) instead of reading stored data. The common case,
//! a "total" summing a set of data columns, is plain data so the columns a
//! total depends on can be inspected without running it. Anything else can
//! be expressed as a [`CustomFormula`] closure.

use std::fmt;
use std::sync::Arc;

use crate::column::ColumnId;
use crate::row::Row;
use crate::value::CellValue;

/// Signature of a custom formula: `(row, all top-level rows) -> value`
pub type FormulaFn = dyn Fn(&Row, &[Row]) -> CellValue + Send + Sync;

/// A column's derived-value rule
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Formula {
    /// Sum of the listed data columns
    ///
    /// On a group row the columns are summed across the group's immediate
    /// children; on any other row they are summed from the row's own data.
    SumOf {
        /// Columns read by the sum
        columns: Vec<ColumnId>,
    },

    /// Arbitrary computation supplied by the caller
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(CustomFormula),
}

impl Formula {
    /// Sum the given columns
    pub fn sum_of<I, C>(columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnId>,
    {
        Formula::SumOf {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Wrap a closure as a formula
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Row, &[Row]) -> CellValue + Send + Sync + 'static,
    {
        Formula::Custom(CustomFormula::new(f))
    }

    /// Columns this formula reads, when known statically
    pub fn dependencies(&self) -> Option<&[ColumnId]> {
        match self {
            Formula::SumOf { columns } => Some(columns),
            Formula::Custom(_) => None,
        }
    }

    /// Compute the value for `row`; `roots` is the full top-level row list
    pub fn evaluate(&self, row: &Row, roots: &[Row]) -> CellValue {
        match self {
            Formula::SumOf { columns } => CellValue::Number(sum_columns(row, columns)),
            Formula::Custom(f) => f.call(row, roots),
        }
    }

    /// serde helper: formulas that cannot be written out are skipped
    #[cfg(feature = "serde")]
    pub(crate) fn is_absent_or_custom(formula: &Option<Formula>) -> bool {
        !matches!(formula, Some(Formula::SumOf { .. }))
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::SumOf { columns } => {
                f.debug_struct("SumOf").field("columns", columns).finish()
            }
            Formula::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn sum_columns(row: &Row, columns: &[ColumnId]) -> f64 {
    if row.is_group {
        columns
            .iter()
            .map(|col| {
                row.children
                    .iter()
                    .map(|child| child.value(col).to_number_lossy())
                    .sum::<f64>()
            })
            .sum()
    } else {
        columns
            .iter()
            .map(|col| row.value(col).to_number_lossy())
            .sum()
    }
}

/// Caller-supplied formula closure
#[derive(Clone)]
pub struct CustomFormula(Arc<FormulaFn>);

impl CustomFormula {
    /// Wrap a closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Row, &[Row]) -> CellValue + Send + Sync + 'static,
    {
        CustomFormula(Arc::new(f))
    }

    /// Invoke the closure
    pub fn call(&self, row: &Row, roots: &[Row]) -> CellValue {
        (self.0)(row, roots)
    }
}
