use anyhow::Result;
use std::sync::Arc;

use super::view::ConsoleView;
use crate::controller::ConversionController;
use crate::core::rates::RateProvider;

/// One-shot conversion. The amount arrives as the raw string the user
/// typed so validation runs the same path as interactive edits; failed
/// conversions are rendered, not propagated.
pub async fn run(provider: Arc<dyn RateProvider>, amount: &str, from: &str, to: &str) -> Result<()> {
    let view = Arc::new(ConsoleView::new());
    let controller = ConversionController::new(provider, view, from, to);
    controller.set_amount(amount).await;
    controller.convert().await;
    Ok(())
}
