//! ledger-grid CLI - inspect and edit grid documents

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ledger_grid::prelude::*;
use ledger_grid::{RenderedRow, PLACEHOLDER};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lgrid")]
#[command(author, version, about = "Inspect and edit hierarchical grid documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grid as a text table
    Show {
        /// Input grid document (JSON)
        input: PathBuf,

        /// Expand every group before rendering
        #[arg(short, long)]
        expand_all: bool,

        /// Override the number of frozen columns
        #[arg(short, long)]
        frozen: Option<usize>,

        /// Currency symbol for currency columns (default: TND)
        #[arg(long)]
        currency_symbol: Option<String>,
    },

    /// Print the flattened row ids, indented by level
    Tree {
        /// Input grid document (JSON)
        input: PathBuf,

        /// Expand every group
        #[arg(short, long)]
        expand_all: bool,
    },

    /// Apply cell edits and write the updated document
    Edit {
        /// Input grid document (JSON)
        input: PathBuf,

        /// Edit to apply, as ROW:COLUMN=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "ROW:COLUMN=VALUE", required = true)]
        sets: Vec<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            input,
            expand_all,
            frozen,
            currency_symbol,
        } => show(&input, expand_all, frozen, currency_symbol),
        Commands::Tree { input, expand_all } => tree(&input, expand_all),
        Commands::Edit {
            input,
            sets,
            output,
        } => edit(&input, &sets, output.as_deref()),
    }
}

fn open(input: &Path) -> Result<GridDocument> {
    GridDocument::from_path(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn show(
    input: &Path,
    expand_all: bool,
    frozen: Option<usize>,
    currency_symbol: Option<String>,
) -> Result<()> {
    let mut doc = open(input)?;
    if let Some(count) = frozen {
        doc.options.frozen_columns = count;
    }

    let mut format = CurrencyFormat::default();
    if let Some(symbol) = currency_symbol {
        format = format.with_symbol(symbol);
    }

    let mut grid = doc
        .into_view(CommitStrategy::SelfManaged)
        .context("Invalid grid document")?
        .with_formatter(format);
    if expand_all {
        grid.expand_all();
    }

    let table = render_table(&grid.snapshot());
    io::stdout()
        .write_all(table.as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}

/// Lay a snapshot out as fixed-width text
///
/// Frozen columns are separated from the scrollable ones by `||`.
fn render_table(snapshot: &GridSnapshot) -> String {
    if snapshot.header.is_empty() {
        return String::from("(no columns)\n");
    }

    let labels: Vec<String> = snapshot.rows.iter().map(row_label).collect();
    let mut widths: Vec<usize> = snapshot
        .header
        .iter()
        .map(|h| h.label.chars().count())
        .collect();
    for (row, label) in snapshot.rows.iter().zip(&labels) {
        for (i, cell) in row.cells.iter().enumerate() {
            let len = if i == 0 {
                label.chars().count()
            } else {
                cell.text.chars().count()
            };
            widths[i] = widths[i].max(len);
        }
    }

    let mut out = String::new();
    let header: Vec<&str> = snapshot.header.iter().map(|h| h.label.as_str()).collect();
    push_line(&mut out, snapshot, &header, &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, snapshot, &rule, &widths);

    for (row, label) in snapshot.rows.iter().zip(&labels) {
        let texts: Vec<&str> = row
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| if i == 0 { label.as_str() } else { cell.text.as_str() })
            .collect();
        push_line(&mut out, snapshot, &texts, &widths);
    }

    if snapshot.is_empty() {
        out.push_str("(no rows)\n");
    }
    out
}

/// First-column text: the row label, indented, with a group marker
fn row_label(row: &RenderedRow) -> String {
    let marker = match (row.is_group, row.expanded) {
        (true, true) => "- ",
        (true, false) => "+ ",
        (false, _) => "  ",
    };
    let label = if row.label.is_empty() {
        PLACEHOLDER
    } else {
        row.label.as_str()
    };
    format!("{}{}{}", "  ".repeat(row.level), marker, label)
}

fn push_line(out: &mut String, snapshot: &GridSnapshot, texts: &[&str], widths: &[usize]) {
    for (i, (text, width)) in texts.iter().zip(widths).enumerate() {
        if i > 0 {
            let frozen_edge = snapshot.header[i - 1].frozen && !snapshot.header[i].frozen;
            out.push_str(if frozen_edge { " || " } else { " | " });
        }
        let kind = snapshot.header[i].kind;
        let pad = width.saturating_sub(text.chars().count());
        if i > 0 && kind.is_numeric() {
            out.push_str(&" ".repeat(pad));
            out.push_str(text);
        } else {
            out.push_str(text);
            out.push_str(&" ".repeat(pad));
        }
    }
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}

fn tree(input: &Path, expand_all: bool) -> Result<()> {
    let doc = open(input)?;
    let mut grid = doc
        .into_view(CommitStrategy::SelfManaged)
        .context("Invalid grid document")?;
    if expand_all {
        grid.expand_all();
    }

    let mut stdout = io::stdout().lock();
    for flat in grid.flattened() {
        let marker = if flat.row.is_group {
            if grid.is_expanded(flat.id()) {
                "-"
            } else {
                "+"
            }
        } else {
            " "
        };
        writeln!(
            stdout,
            "{}{} {}\t{}",
            "  ".repeat(flat.level),
            marker,
            flat.id(),
            flat.row.label
        )
        .context("Failed to write to stdout")?;
    }
    Ok(())
}

/// Split `ROW:COLUMN=VALUE`
fn parse_set(arg: &str) -> Result<(RowId, ColumnId, &str)> {
    let Some((target, value)) = arg.split_once('=') else {
        bail!("Invalid edit '{}': expected ROW:COLUMN=VALUE", arg);
    };
    let Some((row, column)) = target.split_once(':') else {
        bail!("Invalid edit '{}': expected ROW:COLUMN before '='", arg);
    };
    if row.is_empty() || column.is_empty() {
        bail!("Invalid edit '{}': row and column must not be empty", arg);
    }
    Ok((RowId::new(row), ColumnId::new(column), value))
}

fn edit(input: &Path, sets: &[String], output: Option<&Path>) -> Result<()> {
    let edits = sets
        .iter()
        .map(|s| parse_set(s))
        .collect::<Result<Vec<_>>>()?;

    let mut grid = open(input)?
        .into_view(CommitStrategy::SelfManaged)
        .context("Invalid grid document")?;

    for (row, column, value) in &edits {
        if !grid.start_editing(row, column) {
            bail!(
                "Cell {}:{} does not exist or is not editable",
                row,
                column
            );
        }
        grid.set_draft(*value);
        grid.commit();
    }

    let doc = GridDocument::from_view(&grid);
    if let Some(output_path) = output {
        doc.write_path(output_path)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!(
            "Applied {} edit(s), wrote '{}'",
            edits.len(),
            output_path.display()
        );
    } else {
        let json = doc.to_json_string().context("Failed to serialize document")?;
        println!("{}", json);
    }
    Ok(())
}
