//! Conversion controller: validates input, orchestrates rate fetches and
//! drives the presentation surface.

pub mod debounce;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use crate::controller::debounce::Debouncer;
use crate::core::convert::{self, Conversion};
use crate::core::error::ConvertError;
use crate::core::rates::RateProvider;

/// Presentation collaborator. Implementations only mutate display
/// state; the controller decides what is shown and when.
pub trait ConversionView: Send + Sync {
    fn show_loading(&self);
    fn show_error(&self, message: &str);
    fn hide_error(&self);
    fn update_display(&self, conversion: &Conversion);
}

/// Observable controller state. Every conversion attempt restarts at
/// `Loading` unless validation rejects it first; the display always ends
/// in a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Loading,
    Success,
    Error,
}

struct Selection {
    amount: String,
    from: String,
    to: String,
}

/// Owns the user-facing conversion state: the raw amount, the currency
/// pair, the debounce timer for amount edits, and a request sequence
/// counter so that of two overlapping conversions only the latest one
/// paints the display.
pub struct ConversionController {
    provider: Arc<dyn RateProvider>,
    view: Arc<dyn ConversionView>,
    selection: Mutex<Selection>,
    state: Mutex<ControllerState>,
    seq: AtomicU64,
    debouncer: Debouncer,
}

/// Quiet period after the last amount edit before a conversion fires.
pub const AMOUNT_DEBOUNCE: Duration = Duration::from_millis(500);

impl ConversionController {
    pub fn new(provider: Arc<dyn RateProvider>, view: Arc<dyn ConversionView>, from: &str, to: &str) -> Self {
        Self {
            provider,
            view,
            selection: Mutex::new(Selection {
                amount: "1".to_string(),
                from: from.to_uppercase(),
                to: to.to_uppercase(),
            }),
            state: Mutex::new(ControllerState::Idle),
            seq: AtomicU64::new(0),
            debouncer: Debouncer::new(AMOUNT_DEBOUNCE),
        }
    }

    pub async fn state(&self) -> ControllerState {
        *self.state.lock().await
    }

    /// Current `(from, to)` selection.
    pub async fn selection(&self) -> (String, String) {
        let selection = self.selection.lock().await;
        (selection.from.clone(), selection.to.clone())
    }

    pub async fn set_amount(&self, raw: &str) {
        self.selection.lock().await.amount = raw.to_string();
    }

    /// Records an amount edit and schedules a debounced conversion. A
    /// burst of edits converts once, with the value present at the last
    /// edit.
    pub async fn amount_edited(self: &Arc<Self>, raw: &str) {
        self.set_amount(raw).await;
        let controller = Arc::clone(self);
        self.debouncer
            .schedule(async move {
                controller.convert().await;
            })
            .await;
    }

    /// Changing the source currency re-triggers conversion immediately.
    pub async fn set_from(&self, code: &str) {
        self.selection.lock().await.from = code.to_uppercase();
        self.convert().await;
    }

    /// Changing the target currency re-triggers conversion immediately.
    pub async fn set_to(&self, code: &str) {
        self.selection.lock().await.to = code.to_uppercase();
        self.convert().await;
    }

    /// Exchanges the source and target currencies, then re-converts.
    pub async fn swap(&self) {
        {
            let mut selection = self.selection.lock().await;
            let selection = &mut *selection;
            std::mem::swap(&mut selection.from, &mut selection.to);
        }
        self.convert().await;
    }

    /// Runs one conversion attempt end to end. Every error is mapped to
    /// its message and rendered through the view; nothing propagates.
    pub async fn convert(&self) {
        let (raw, from, to) = {
            let selection = self.selection.lock().await;
            (
                selection.amount.clone(),
                selection.from.clone(),
                selection.to.clone(),
            )
        };

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = self.run_conversion(&raw, &from, &to).await;

        if self.seq.load(Ordering::SeqCst) != seq {
            debug!("Dropping superseded conversion result for {from}->{to}");
            return;
        }

        match outcome {
            Ok(conversion) => {
                *self.state.lock().await = ControllerState::Success;
                self.view.update_display(&conversion);
                self.view.hide_error();
            }
            Err(e) => {
                *self.state.lock().await = ControllerState::Error;
                self.view.show_error(&e.to_string());
            }
        }
    }

    async fn run_conversion(
        &self,
        raw: &str,
        from: &str,
        to: &str,
    ) -> Result<Conversion, ConvertError> {
        let amount = convert::parse_amount(raw)?;

        // Same-currency fast path bypasses the network entirely.
        if from == to {
            return Ok(Conversion::identity(amount, from));
        }

        *self.state.lock().await = ControllerState::Loading;
        self.view.show_loading();

        let entry = self.provider.fetch_rates(from).await?;
        Conversion::compute(amount, from, to, &entry)
    }
}
