use crate::format::DisplayRow;
use crate::style::{Style, Styled};
use crate::table::{Cell, Table};

pub const PORT_HEADERS: [&str; 3] = ["EXTERNAL IP", "IN PORT", "INTERNAL IP"];

/// One outer table per row, same order as the rows.
pub fn container_tables(rows: &[DisplayRow]) -> Vec<Table> {
    rows.iter().map(container_table).collect()
}

fn label(text: &str) -> Cell {
    Styled::new(text, Style::Label).into()
}

fn container_table(row: &DisplayRow) -> Table {
    let mut table = Table::new(&[""], Style::Value)
        .with_title(row.title.clone())
        .without_header();

    table.add_row(vec![label("Status"), row.status.clone().into()]);
    table.add_row(vec![label("Created"), Cell::plain(&row.age_text)]);
    table.add_row(vec![label("Container ID"), Cell::plain(&row.container_id)]);
    table.add_row(vec![label("Image"), Cell::plain(&row.image_short)]);

    if !row.ports_display.is_empty() {
        let mut ports = Table::new(&PORT_HEADERS, Style::Value);
        for (port, url) in &row.ports_display {
            ports.add_row(vec![
                Cell::plain(url),
                Cell::plain(port),
                Cell::plain(&row.internal_address),
            ]);
        }
        table.add_row(vec![label("Ports"), ports.into()]);
    }

    table
}
