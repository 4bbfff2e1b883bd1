//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching quotes from a provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// A provider-specific error: a non-success status, or an error marker
    /// in the payload itself.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response body could not be interpreted as a quote payload.
    #[error("Parsing error: {0}")]
    ParsingError(String),

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
