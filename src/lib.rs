pub mod cli;
pub mod controller;
pub mod core;
pub mod providers;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::cache::RateCache;
use crate::core::config::AppConfig;
use crate::core::rates::RateProvider;
use crate::providers::ExchangeRateApiProvider;

pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Rates {
        base: Option<String>,
    },
    Currencies,
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("cambio starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let cache = Arc::new(RateCache::new(config.cache_ttl()));
    let provider: Arc<dyn RateProvider> =
        Arc::new(ExchangeRateApiProvider::new(&config.provider.base_url, cache));

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(provider, &amount, &from.to_uppercase(), &to.to_uppercase()).await
        }
        AppCommand::Rates { base } => {
            let base = base
                .unwrap_or_else(|| config.default_from.clone())
                .to_uppercase();
            cli::rates::run(provider.as_ref(), &base).await
        }
        AppCommand::Currencies => {
            cli::currencies::run();
            Ok(())
        }
        AppCommand::Interactive => cli::interactive::run(provider, &config).await,
    }
}
