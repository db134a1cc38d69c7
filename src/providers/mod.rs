pub mod exchangerate_api;

// Re-export the provider abstraction alongside its implementation
pub use crate::core::rates::RateProvider;
pub use exchangerate_api::ExchangeRateApiProvider;
