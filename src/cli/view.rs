use chrono::Local;
use indicatif::ProgressBar;
use std::sync::Mutex;

use super::ui;
use crate::controller::ConversionView;
use crate::core::convert::{Conversion, format_amount};

/// Terminal rendering of the conversion display: a spinner while a fetch
/// is in flight, a styled result line with its staleness timestamp, and
/// error text on stderr.
pub struct ConsoleView {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn clear_spinner(&self) {
        let mut slot = self
            .spinner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(spinner) = slot.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionView for ConsoleView {
    fn show_loading(&self) {
        let mut slot = self
            .spinner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = slot.take() {
            previous.finish_and_clear();
        }
        *slot = Some(ui::new_spinner("Converting... Please wait"));
    }

    fn update_display(&self, conversion: &Conversion) {
        self.clear_spinner();
        println!(
            "{} {} = {} {}",
            format_amount(conversion.amount),
            conversion.from,
            ui::style_text(&format_amount(conversion.converted), ui::StyleType::Value),
            conversion.to
        );
        let date_line = match conversion.rates_fetched_at {
            Some(fetched_at) => format!(
                "Last updated: {}",
                fetched_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            ),
            None => "Rates loading...".to_string(),
        };
        println!("{}", ui::style_text(&date_line, ui::StyleType::Subtle));
    }

    fn show_error(&self, message: &str) {
        self.clear_spinner();
        println!("{}", ui::style_text("Conversion failed", ui::StyleType::Error));
        println!("{}", ui::style_text("See error below", ui::StyleType::Subtle));
        eprintln!("{message}");
    }

    fn hide_error(&self) {
        // Terminal output cannot be retracted; errors are simply not
        // re-printed once a conversion succeeds.
    }
}
