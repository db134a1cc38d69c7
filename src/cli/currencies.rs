use super::ui;
use crate::core::currency;

/// Prints the static currency catalog.
pub fn run() {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);
    for entry in currency::CATALOG {
        table.add_row(vec![entry.code, entry.name]);
    }
    println!("{table}");
}
