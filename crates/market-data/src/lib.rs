//! Cambio Market Data Crate
//!
//! Provider client for fetching current currency quotes from the
//! AwesomeAPI batched quote endpoint.
//!
//! Errors at this layer are strict ([`MarketDataError`]); the core crate
//! decides how to degrade when a fetch fails.

pub mod errors;
pub mod provider;

pub use errors::MarketDataError;
pub use provider::awesome_api::{AwesomeApiClient, PairQuote};
