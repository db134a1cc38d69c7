//! Rate provider abstraction.

use async_trait::async_trait;

use crate::core::cache::CacheEntry;
use crate::core::error::ConvertError;

/// Supplies the rate table for a base currency, together with the
/// timestamp of the fetch that produced it.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, base: &str) -> Result<CacheEntry, ConvertError>;
}
