//! End-to-end grid interaction scenarios

use std::cell::RefCell;
use std::rc::Rc;

use ledger_grid::prelude::*;
use ledger_grid::{EditState, PLACEHOLDER};
use pretty_assertions::assert_eq;

type Changes = Rc<RefCell<Vec<(String, String, CellValue)>>>;

fn budget_columns() -> Vec<Column> {
    vec![
        Column::new("account", "ACCOUNT").with_editable(false),
        Column::new("jan-2022", "JAN 2022").with_type(ColumnType::Currency),
        Column::new("total", "TOTAL")
            .with_type(ColumnType::Currency)
            .with_editable(false)
            .with_formula(Formula::sum_of(["jan-2022"])),
    ]
}

fn income(a: f64, b: f64) -> Vec<Row> {
    vec![Row::group(
        "income",
        "Income",
        vec![
            Row::leaf("sales", "Sales").with_value("jan-2022", a),
            Row::leaf("services", "Services").with_value("jan-2022", b),
        ],
    )]
}

fn recorder() -> (Changes, impl FnMut(&RowId, &ColumnId, CellValue)) {
    let changes: Changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let handler = move |row: &RowId, column: &ColumnId, value: CellValue| {
        sink.borrow_mut()
            .push((row.to_string(), column.to_string(), value));
    };
    (changes, handler)
}

fn usd() -> CurrencyFormat {
    CurrencyFormat::usd_en()
}

/// Controlled edit reaches the owner, and the re-supplied rows update the total
#[test]
fn test_income_total_controlled_edit() {
    let (changes, handler) = recorder();
    let mut grid = GridView::controlled(
        budget_columns(),
        income(100.0, 200.0),
        GridOptions::default(),
        handler,
    )
    .unwrap()
    .with_formatter(usd());

    assert_eq!(grid.cell_display("income", "total").unwrap().text, "$300.00");

    assert!(grid.start_editing(&"services".into(), &"jan-2022".into()));
    assert_eq!(grid.draft(), Some("200"));
    grid.set_draft("150");
    assert!(grid.handle_key(GridKey::Enter));

    assert_eq!(
        changes.borrow().as_slice(),
        &[(
            "services".to_string(),
            "jan-2022".to_string(),
            CellValue::Number(150.0)
        )]
    );
    // Controlled mode leaves local rows alone
    assert_eq!(grid.cell_display("income", "total").unwrap().text, "$300.00");

    grid.set_rows(income(100.0, 150.0)).unwrap();
    assert_eq!(grid.cell_display("income", "total").unwrap().text, "$250.00");
}

/// The same edit in self-managed mode updates the grid's own rows
#[test]
fn test_income_total_self_managed_edit() {
    let mut grid =
        GridView::self_managed(budget_columns(), income(100.0, 200.0), GridOptions::default())
            .unwrap();

    grid.start_editing(&"services".into(), &"jan-2022".into());
    grid.set_draft("150");
    grid.blur();

    assert_eq!(grid.cell_value("income", "total"), Some(CellValue::Number(250.0)));
    assert_eq!(
        grid.row("services").unwrap().value("jan-2022"),
        &CellValue::Number(150.0)
    );
}

/// An editable formula column seeds its draft from the computed value and keeps
/// showing the computed value after the edit is stored
#[test]
fn test_editable_formula_column() {
    let columns = vec![
        Column::new("account", "ACCOUNT").with_editable(false),
        Column::new("jan-2022", "JAN 2022").with_type(ColumnType::Currency),
        Column::new("total", "TOTAL")
            .with_type(ColumnType::Currency)
            .with_formula(Formula::sum_of(["jan-2022"])),
    ];
    let rows = vec![Row::leaf("sales", "Sales")
        .with_value("jan-2022", 100.0)
        .with_value("total", 5.0)];
    let mut grid = GridView::self_managed(columns, rows, GridOptions::default())
        .unwrap()
        .with_formatter(usd());

    assert!(grid.start_editing(&"sales".into(), &"total".into()));
    assert_eq!(grid.draft(), Some("100"));
    grid.set_draft("999");
    assert!(grid.handle_key(GridKey::Enter));

    assert_eq!(grid.row("sales").unwrap().value("total"), &CellValue::Number(999.0));
    assert_eq!(grid.cell_value("sales", "total"), Some(CellValue::Number(100.0)));
    assert_eq!(grid.cell_display("sales", "total").unwrap().text, "$100.00");
}

/// Only roots show while collapsed; expanding shows exactly the direct children
#[test]
fn test_three_level_tree_collapsed_by_default() {
    let rows = vec![
        Row::group(
            "pl",
            "Profit and Loss",
            vec![
                Row::group("income", "Income", vec![Row::leaf("sales", "Sales")]),
                Row::group("expenses", "Expenses", vec![Row::leaf("rent", "Rent")]),
            ],
        ),
        Row::group("balance", "Balance", vec![Row::leaf("cash", "Cash")]),
    ];
    let mut grid = GridView::self_managed(budget_columns(), rows, GridOptions::default()).unwrap();

    let ids = |grid: &GridView| -> Vec<String> {
        grid.flattened().iter().map(|f| f.id().to_string()).collect()
    };
    assert_eq!(ids(&grid), vec!["pl", "balance"]);

    grid.toggle_expansion(&"pl".into());
    assert_eq!(ids(&grid), vec!["pl", "income", "expenses", "balance"]);

    let levels: Vec<usize> = grid.flattened().iter().map(|f| f.level).collect();
    assert_eq!(levels, vec![0, 1, 1, 0]);

    grid.expand_all();
    assert_eq!(
        ids(&grid),
        vec!["pl", "income", "sales", "expenses", "rent", "balance", "cash"]
    );

    grid.collapse_all();
    assert_eq!(ids(&grid), vec!["pl", "balance"]);
}

/// default_expanded opens nested groups too
#[test]
fn test_default_expanded() {
    let rows = vec![Row::group(
        "pl",
        "P&L",
        vec![Row::group("income", "Income", vec![Row::leaf("sales", "Sales")])],
    )];
    let grid = GridView::self_managed(
        budget_columns(),
        rows,
        GridOptions::default().with_default_expanded(true),
    )
    .unwrap();
    assert_eq!(grid.flattened().len(), 3);
}

/// Escape discards the draft without firing the handler
#[test]
fn test_escape_changes_nothing() {
    let (changes, handler) = recorder();
    let mut grid = GridView::controlled(
        budget_columns(),
        income(100.0, 200.0),
        GridOptions::default(),
        handler,
    )
    .unwrap();

    grid.start_editing(&"sales".into(), &"jan-2022".into());
    grid.set_draft("999");
    assert!(grid.handle_key(GridKey::Escape));

    assert_eq!(grid.edit_state(), &EditState::Idle);
    assert!(changes.borrow().is_empty());
    assert_eq!(grid.cell_value("sales", "jan-2022"), Some(CellValue::Number(100.0)));
}

/// Numeric columns keep the leading number and fall back to zero
#[test]
fn test_enter_parses_numbers() {
    let mut grid =
        GridView::self_managed(budget_columns(), income(100.0, 200.0), GridOptions::default())
            .unwrap();
    let (sales, jan) = (RowId::new("sales"), ColumnId::new("jan-2022"));

    grid.start_editing(&sales, &jan);
    grid.set_draft("  42.5abc");
    grid.handle_key(GridKey::Enter);
    assert_eq!(grid.cell_value(&sales, &jan), Some(CellValue::Number(42.5)));

    grid.start_editing(&sales, &jan);
    grid.set_draft("abc");
    grid.handle_key(GridKey::Enter);
    assert_eq!(grid.cell_value(&sales, &jan), Some(CellValue::Number(0.0)));
    assert_eq!(grid.cell_value("income", "total"), Some(CellValue::Number(200.0)));
}

fn notes_grid() -> GridView {
    let columns = vec![
        Column::new("note", "Note"),
        Column::new("qty", "Qty").with_type(ColumnType::Number),
    ];
    let rows = vec![
        Row::leaf("r1", "First").with_value("note", "a").with_value("qty", 1),
        Row::leaf("r2", "Second").with_value("note", "b").with_value("qty", 2),
    ];
    GridView::self_managed(columns, rows, GridOptions::default()).unwrap()
}

/// Tab wraps to the next row, Shift+Tab back to the previous one
#[test]
fn test_tab_wraparound() {
    let mut grid = notes_grid();

    grid.start_editing(&"r1".into(), &"qty".into());
    grid.set_draft("10");
    assert!(grid.handle_key(GridKey::Tab));
    assert!(grid.is_editing_cell(&"r2".into(), &"note".into()));
    assert_eq!(grid.draft(), Some("b"));
    assert_eq!(grid.cell_value("r1", "qty"), Some(CellValue::Number(10.0)));

    grid.set_draft("changed");
    assert!(grid.handle_key(GridKey::BackTab));
    assert!(grid.is_editing_cell(&"r1".into(), &"qty".into()));
    assert_eq!(grid.draft(), Some("10"));
    assert_eq!(grid.cell_value("r2", "note"), Some(CellValue::text("changed")));
}

/// Tab on the last cell only commits
#[test]
fn test_tab_at_grid_end() {
    let mut grid = notes_grid();

    grid.start_editing(&"r2".into(), &"qty".into());
    grid.set_draft("7");
    assert!(grid.handle_key(GridKey::Tab));

    assert_eq!(grid.edit_state(), &EditState::Idle);
    assert_eq!(grid.cell_value("r2", "qty"), Some(CellValue::Number(7.0)));

    grid.start_editing(&"r1".into(), &"note".into());
    grid.handle_key(GridKey::BackTab);
    assert!(!grid.is_editing());
}

/// Moving onto a read-only column ends the edit
#[test]
fn test_tab_onto_read_only_column() {
    let mut grid =
        GridView::self_managed(budget_columns(), income(100.0, 200.0), GridOptions::default())
            .unwrap();
    grid.toggle_expansion(&"income".into());

    grid.start_editing(&"sales".into(), &"jan-2022".into());
    grid.handle_key(GridKey::Tab);
    assert!(!grid.is_editing());

    grid.start_editing(&"sales".into(), &"jan-2022".into());
    grid.handle_key(GridKey::BackTab);
    assert!(!grid.is_editing());
}

/// Hidden columns are never drawn, edited or tabbed through
#[test]
fn test_hidden_columns() {
    let columns = vec![
        Column::new("note", "Note"),
        Column::new("secret", "Secret").with_hidden(true),
        Column::new("qty", "Qty").with_type(ColumnType::Number),
    ];
    let rows = vec![Row::leaf("r1", "First")];
    let mut grid = GridView::self_managed(columns, rows, GridOptions::default()).unwrap();

    assert!(!grid.start_editing(&"r1".into(), &"secret".into()));

    grid.start_editing(&"r1".into(), &"note".into());
    grid.handle_key(GridKey::Tab);
    assert!(grid.is_editing_cell(&"r1".into(), &"qty".into()));

    let snapshot = grid.snapshot();
    let header: Vec<&str> = snapshot.header.iter().map(|h| h.column_id.as_str()).collect();
    assert_eq!(header, vec!["note", "qty"]);
    assert!(snapshot.cell("r1", "secret").is_none());
}

/// Hidden columns offer no resize handle
#[test]
fn test_hidden_column_has_no_resize_handle() {
    let columns = vec![
        Column::new("note", "Note"),
        Column::new("secret", "Secret").with_hidden(true),
        Column::new("qty", "Qty").with_type(ColumnType::Number),
    ];
    let mut grid =
        GridView::self_managed(columns, vec![Row::leaf("r1", "First")], GridOptions::default())
            .unwrap();

    assert!(!grid.layout().has_resize_handle("secret"));
    assert!(!grid.pointer_down_on_handle(&"secret".into(), 0.0));
    assert!(grid.begin_resize(&"secret".into(), 0.0).is_none());
    assert!(grid.pointer_down_on_handle(&"qty".into(), 0.0));
}

#[derive(Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl GridEvents for Recorder {
    fn row_add_requested(&mut self, parent_id: Option<&RowId>) {
        let parent = parent_id.map_or("-", RowId::as_str);
        self.0.borrow_mut().push(format!("add-row {parent}"));
    }

    fn row_delete_requested(&mut self, row_id: &RowId) {
        self.0.borrow_mut().push(format!("delete-row {row_id}"));
    }

    fn column_add_requested(&mut self) {
        self.0.borrow_mut().push("add-column".to_string());
    }

    fn column_delete_requested(&mut self, column_id: &ColumnId) {
        self.0.borrow_mut().push(format!("delete-column {column_id}"));
    }
}

/// Structural requests are forwarded, never applied locally
#[test]
fn test_structural_requests() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut grid =
        GridView::self_managed(budget_columns(), income(100.0, 200.0), GridOptions::default())
            .unwrap()
            .with_events(Recorder(Rc::clone(&log)));

    assert!(grid.request_row_add(None));
    assert!(grid.request_row_add(Some(&"income".into())));
    assert!(!grid.request_row_add(Some(&"sales".into())));
    assert!(grid.request_row_delete(&"sales".into()));
    assert!(!grid.request_row_delete(&"income".into()));
    assert!(!grid.request_row_delete(&"ghost".into()));
    assert!(grid.request_column_add());
    assert!(grid.request_column_delete(&"jan-2022".into()));
    assert!(!grid.request_column_delete(&"ghost".into()));

    assert_eq!(
        log.borrow().as_slice(),
        &[
            "add-row -",
            "add-row income",
            "delete-row sales",
            "add-column",
            "delete-column jan-2022",
        ]
    );
    assert!(grid.row("sales").is_some());
    assert_eq!(grid.columns().len(), 3);
}

/// Snapshot carries layout, indentation and display text
#[test]
fn test_snapshot() {
    let rows = vec![Row::group(
        "income",
        "Income",
        vec![
            Row::leaf("sales", "Sales").with_value("jan-2022", 1234.5),
            Row::leaf("memo", "Memo"),
        ],
    )];
    let mut grid = GridView::self_managed(budget_columns(), rows, GridOptions::default())
        .unwrap()
        .with_events(Recorder::default());
    grid.toggle_expansion(&"income".into());
    grid.start_editing(&"memo".into(), &"jan-2022".into());
    grid.set_draft("12");

    let snapshot = grid.snapshot();
    assert!(!snapshot.is_empty());
    assert_eq!(snapshot.draft.as_deref(), Some("12"));
    assert_eq!(snapshot.frozen_width, 150.0);
    assert_eq!(snapshot.total_width, 450.0);

    let header: Vec<(bool, bool)> = snapshot.header.iter().map(|h| (h.frozen, h.resizable)).collect();
    assert_eq!(header, vec![(true, false), (false, true), (false, true)]);

    let group = &snapshot.rows[0];
    assert!(group.is_group && group.expanded && !group.deletable);
    assert_eq!(group.indent, 0.0);

    let sales = &snapshot.rows[1];
    assert_eq!(sales.level, 1);
    assert_eq!(sales.indent, 24.0);
    assert!(sales.deletable);
    assert_eq!(
        snapshot.cell("sales", "jan-2022").unwrap().text,
        "1\u{202F}234,50 TND"
    );

    let account = snapshot.cell("sales", "account").unwrap();
    assert_eq!(account.text, PLACEHOLDER);
    assert!(account.is_placeholder && account.frozen && !account.editable);

    assert!(snapshot.cell("memo", "jan-2022").unwrap().editing);
    assert!(!snapshot.cell("sales", "jan-2022").unwrap().editing);
}

/// A grid with no rows renders empty but keeps its header
#[test]
fn test_empty_grid() {
    let grid = GridView::self_managed(budget_columns(), vec![], GridOptions::default()).unwrap();
    assert!(grid.is_empty());
    let snapshot = grid.snapshot();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.header.len(), 3);
    assert!(snapshot.toolbar.add_row);
}

/// Closures work as currency formatters
#[test]
fn test_closure_formatter() {
    let grid = GridView::self_managed(budget_columns(), income(1.0, 2.0), GridOptions::default())
        .unwrap()
        .with_formatter(|amount: f64| format!("{amount:.1} EUR"));
    assert_eq!(grid.cell_display("income", "total").unwrap().text, "3.0 EUR");
}

/// A scoped resize always ends with the guard
#[test]
fn test_scoped_resize() {
    let mut grid =
        GridView::self_managed(budget_columns(), income(1.0, 2.0), GridOptions::default()).unwrap();
    {
        let mut guard = grid.begin_resize(&"total".into(), 0.0).unwrap();
        assert_eq!(guard.drag_to(-500.0), 100.0);
        assert_eq!(guard.drag_to(30.0), 180.0);
    }
    assert!(grid.layout().resizing().is_none());
    assert_eq!(grid.column_width("total"), 180.0);
    assert!(grid.begin_resize(&"account".into(), 0.0).is_none());
}

/// Without frozen columns the first column resizes like any other
#[test]
fn test_first_column_resizable_without_frozen() {
    let columns = vec![
        Column::new("a", "A"),
        Column::new("b", "B").with_type(ColumnType::Number),
    ];
    let mut grid = GridView::self_managed(
        columns,
        vec![],
        GridOptions::default().with_frozen_columns(0),
    )
    .unwrap();

    let snapshot = grid.snapshot();
    let header: Vec<(bool, bool)> = snapshot.header.iter().map(|h| (h.frozen, h.resizable)).collect();
    assert_eq!(header, vec![(false, true), (false, true)]);
    assert_eq!(snapshot.frozen_width, 0.0);

    assert!(grid.pointer_down_on_handle(&"a".into(), 10.0));
    assert_eq!(grid.pointer_move(60.0), Some(200.0));
    assert_eq!(grid.pointer_up(), Some((ColumnId::new("a"), 200.0)));
    assert_eq!(grid.column_width("a"), 200.0);
}
