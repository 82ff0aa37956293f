//! Tree flattening
//!
//! Converts the row forest into the ordered list the grid renders: a
//! depth-first pre-order walk in which a group's children follow it, one
//! level deeper, only while the group is expanded. Input child order is kept
//! as-is, so the output is fully determined by the forest and the expansion
//! state.

use ledger_grid_core::{Row, RowId};

use crate::expansion::ExpansionState;

/// A row as placed in the flattened grid
#[derive(Debug, Clone, Copy)]
pub struct FlatRow<'a> {
    /// The row itself (children still attached)
    pub row: &'a Row,
    /// Computed depth (0 = root)
    pub level: usize,
    /// Id of the owning row, if any
    pub parent_id: Option<&'a RowId>,
}

impl<'a> FlatRow<'a> {
    /// Id of the row
    pub fn id(&self) -> &'a RowId {
        &self.row.id
    }

    /// Owned copy annotated with the computed level and parent
    pub fn to_row(&self) -> Row {
        Row {
            level: self.level,
            parent_id: self.parent_id.cloned(),
            ..self.row.clone()
        }
    }
}

/// Flatten the forest honoring the expansion state
pub fn flatten<'a>(roots: &'a [Row], expansion: &ExpansionState) -> Vec<FlatRow<'a>> {
    let mut out = Vec::with_capacity(roots.len());
    let mut stack: Vec<FlatRow<'a>> = roots
        .iter()
        .rev()
        .map(|row| FlatRow {
            row,
            level: 0,
            parent_id: None,
        })
        .collect();

    while let Some(flat) = stack.pop() {
        let row = flat.row;
        if row.has_children() && expansion.is_expanded(&row.id) {
            stack.extend(row.children.iter().rev().map(|child| FlatRow {
                row: child,
                level: flat.level + 1,
                parent_id: Some(&row.id),
            }));
        }
        out.push(flat);
    }

    tracing::trace!(
        roots = roots.len(),
        visible = out.len(),
        "flattened row forest"
    );
    out
}

/// Flatten into owned rows with `level` and `parent_id` rewritten
pub fn flatten_owned(roots: &[Row], expansion: &ExpansionState) -> Vec<Row> {
    flatten(roots, expansion)
        .iter()
        .map(FlatRow::to_row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn forest() -> Vec<Row> {
        vec![
            Row::group(
                "pl",
                "Profit and Loss",
                vec![
                    Row::group(
                        "income",
                        "Income",
                        vec![Row::leaf("sales", "Sales"), Row::leaf("services", "Services")],
                    ),
                    Row::group("expense", "Expense", vec![Row::leaf("rent", "Rent")]),
                ],
            ),
            Row::leaf("memo", "Memo"),
        ]
    }

    fn ids<'a>(flat: &'a [FlatRow<'a>]) -> Vec<&'a str> {
        flat.iter().map(|f| f.id().as_str()).collect()
    }

    #[test]
    fn test_collapsed_shows_roots_only() {
        let roots = forest();
        let flat = flatten(&roots, &ExpansionState::new());
        assert_eq!(ids(&flat), vec!["pl", "memo"]);
        assert!(flat.iter().all(|f| f.level == 0 && f.parent_id.is_none()));
    }

    #[test]
    fn test_fully_expanded_preorder() {
        let roots = forest();
        let flat = flatten(&roots, &ExpansionState::all_expanded(&roots));
        assert_eq!(
            ids(&flat),
            vec!["pl", "income", "sales", "services", "expense", "rent", "memo"]
        );
        let levels: Vec<usize> = flat.iter().map(|f| f.level).collect();
        assert_eq!(levels, vec![0, 1, 2, 2, 1, 2, 0]);
        assert_eq!(flat[2].parent_id.map(RowId::as_str), Some("income"));
        assert_eq!(flat[4].parent_id.map(RowId::as_str), Some("pl"));
    }

    #[test]
    fn test_collapsed_parent_hides_expanded_descendants() {
        let roots = forest();
        let expansion: ExpansionState = [RowId::new("income")].into_iter().collect();
        let flat = flatten(&roots, &expansion);
        assert_eq!(ids(&flat), vec!["pl", "memo"]);
    }

    #[test]
    fn test_level_hint_is_recomputed() {
        let roots = vec![Row::group(
            "g",
            "G",
            vec![Row::leaf("c", "C").with_level(7)],
        )
        .with_level(3)];
        let expansion = ExpansionState::all_expanded(&roots);
        let owned = flatten_owned(&roots, &expansion);
        assert_eq!(owned[0].level, 0);
        assert_eq!(owned[1].level, 1);
        assert_eq!(owned[1].parent_id, Some(RowId::new("g")));
    }

    #[test]
    fn test_empty_forest() {
        assert!(flatten(&[], &ExpansionState::new()).is_empty());
    }
}
