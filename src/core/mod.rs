//! Core conversion logic and shared abstractions

pub mod cache;
pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use cache::{CacheEntry, Clock, RateCache, RateTable, SystemClock};
pub use convert::Conversion;
pub use error::ConvertError;
pub use rates::RateProvider;
