use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::ui;
use super::view::ConsoleView;
use crate::controller::ConversionController;
use crate::core::config::AppConfig;
use crate::core::currency;
use crate::core::rates::RateProvider;

/// Interactive conversion session.
///
/// A single controller instance owns all bindings for the lifetime of
/// the session. Typing a number edits the amount and converts after the
/// debounce window; `from`/`to`/`swap` re-convert immediately.
pub async fn run(provider: Arc<dyn RateProvider>, config: &AppConfig) -> Result<()> {
    let view = Arc::new(ConsoleView::new());
    let controller = Arc::new(ConversionController::new(
        provider.clone(),
        view,
        &config.default_from,
        &config.default_to,
    ));

    print_help();

    // Warm the cache for the default base, then show the initial
    // conversion of 1 unit.
    if provider.fetch_rates(&config.default_from).await.is_err() {
        eprintln!(
            "{}",
            ui::style_text("Failed to load initial exchange rates", ui::StyleType::Error)
        );
    }
    controller.convert().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        debug!("Interactive input: {input}");

        let mut words = input.split_whitespace();
        match (words.next(), words.next()) {
            (Some("quit"), _) | (Some("exit"), _) => break,
            (Some("help"), _) => print_help(),
            (Some("convert"), _) => controller.convert().await,
            (Some("swap"), _) => controller.swap().await,
            (Some("from"), Some(code)) => {
                if warn_unknown(code) {
                    controller.set_from(code).await;
                }
            }
            (Some("to"), Some(code)) => {
                if warn_unknown(code) {
                    controller.set_to(code).await;
                }
            }
            (Some(word), None) if word.parse::<f64>().is_ok() => {
                controller.amount_edited(word).await;
            }
            _ => {
                println!(
                    "{}",
                    ui::style_text("Unrecognized input, type 'help' for commands", ui::StyleType::Subtle)
                );
            }
        }
    }

    Ok(())
}

/// Returns true when the code is usable; prints a hint otherwise.
fn warn_unknown(code: &str) -> bool {
    if currency::is_known(&code.to_uppercase()) {
        return true;
    }
    println!(
        "{}",
        ui::style_text(
            &format!("Unknown currency '{code}', type 'help' to list currencies"),
            ui::StyleType::Subtle
        )
    );
    false
}

fn print_help() {
    println!("{}", ui::style_text("cambio interactive mode", ui::StyleType::Title));
    println!("  <number>      set the amount (converts after a short pause)");
    println!("  from <code>   change the source currency");
    println!("  to <code>     change the target currency");
    println!("  swap          exchange source and target");
    println!("  convert       convert now");
    println!("  quit          leave");
    super::currencies::run();
}
