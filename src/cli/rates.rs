use anyhow::{Context, Result};
use chrono::Local;

use super::ui;
use crate::core::convert::format_amount;
use crate::core::currency;
use crate::core::rates::RateProvider;

/// Prints the full rate table for a base currency.
pub async fn run(provider: &dyn RateProvider, base: &str) -> Result<()> {
    let entry = provider
        .fetch_rates(base)
        .await
        .with_context(|| format!("Could not fetch exchange rates for {base}"))?;

    println!(
        "{}",
        ui::style_text(&format!("Exchange rates for {base}"), ui::StyleType::Title)
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Name"),
        ui::header_cell("Rate"),
    ]);

    let mut codes: Vec<&String> = entry.rates.keys().collect();
    codes.sort();
    for code in codes {
        let rate = entry.rates[code];
        table.add_row(vec![
            ui::value_cell(code),
            comfy_table::Cell::new(currency::display_name(code).unwrap_or("-")),
            ui::value_cell(&format_amount(rate)),
        ]);
    }
    println!("{table}");

    println!(
        "{}",
        ui::style_text(
            &format!(
                "Last updated: {}",
                entry
                    .fetched_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
            ),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}
