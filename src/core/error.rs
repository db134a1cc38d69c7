//! Error taxonomy for conversion attempts.
//!
//! Every variant carries the exact message shown to the user; transport
//! and decode causes are attached as sources for logging, never displayed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Please enter a valid amount greater than 0")]
    InvalidAmount,

    #[error("Exchange rate not available for selected currencies")]
    RateUnavailable,

    /// The rate provider answered with a non-success HTTP status.
    #[error("Network response was not ok")]
    Network(reqwest::StatusCode),

    /// Transport-level failure (DNS, refused connection, timeout).
    #[error("Failed to fetch exchange rates. Please check your internet connection.")]
    Fetch(#[source] reqwest::Error),

    /// The response body did not contain a usable `rates` mapping.
    #[error("Received a malformed response from the rate provider")]
    Decode(#[source] serde_json::Error),
}
