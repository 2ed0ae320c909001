use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::types::{BatchResult, TransferSummary};

/// Print a single transfer's outcome.
pub fn print_transfer(summary: &TransferSummary) {
    if summary.completed {
        match (&summary.doi, summary.deposit_id) {
            (Some(doi), _) => println!(
                "Record {} transferred and published as {doi}",
                summary.legacy_id
            ),
            (None, Some(deposit_id)) => println!(
                "Record {} transferred to deposit {deposit_id}",
                summary.legacy_id
            ),
            (None, None) => println!("Record {} transferred", summary.legacy_id),
        }
    } else {
        println!(
            "Record {} failed: {}",
            summary.legacy_id,
            summary.detail.as_deref().unwrap_or("unknown failure")
        );
    }
    if summary.warnings > 0 {
        println!("  ({} transform warning(s) logged)", summary.warnings);
    }
}

/// Print the batch outcome table.
pub fn print_batch_summary(result: &BatchResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("Outcome"),
        header_cell("Deposit"),
        header_cell("DOI"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    for transfer in &result.transfers {
        table.add_row(vec![
            Cell::new(transfer.legacy_id),
            outcome_cell(transfer.completed),
            option_cell(transfer.deposit_id.map(|id| id.to_string())),
            option_cell(transfer.doi.clone()),
            option_cell(transfer.detail.clone()),
        ]);
    }
    println!("{table}");

    let completed = result
        .transfers
        .iter()
        .filter(|transfer| transfer.completed)
        .count();
    let failed = result.transfers.len() - completed;
    println!(
        "{} record(s) transferred, {} failed",
        completed, failed
    );
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn outcome_cell(completed: bool) -> Cell {
    if completed {
        Cell::new("complete")
            .fg(comfy_table::Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("failed")
            .fg(comfy_table::Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn option_cell(value: Option<String>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => Cell::new("-").fg(comfy_table::Color::DarkGrey),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(Attribute::Bold)
}
