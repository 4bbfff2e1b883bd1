//! Quote cache and refresh module.
//!
//! - [`model`] - domain models for cached quotes
//! - [`store`] - storage trait for the persistent quote cache
//! - [`provider`] - the external provider seam and its typed outcome
//! - [`client`] - facade over the market-data crate
//! - [`service`] - the refresh service deciding when the provider is called
//! - [`constants`] - configuration constants

pub mod client;
pub mod constants;
pub mod model;
pub mod provider;
pub mod service;
pub mod store;

#[cfg(test)]
mod service_tests;

// Re-export commonly used types for convenience
pub use client::MarketDataClient;
pub use constants::*;
pub use model::{NewQuote, Quote};
pub use provider::{FetchOutcome, QuoteProvider};
pub use service::{QuoteService, QuoteServiceTrait, QuoteSnapshot};
pub use store::QuoteStore;
