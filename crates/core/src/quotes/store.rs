//! Quote storage trait.
//!
//! Abstracts the persistence layer so the refresh service can be tested
//! against an in-memory store and backed by SQLite in production.

use async_trait::async_trait;

use super::model::{NewQuote, Quote};
use crate::errors::Result;

/// Storage interface for the persistent quote cache.
///
/// The cache holds at most one entry per non-reference currency; entries
/// are only ever replaced, never deleted. Storage failures are not locally
/// recoverable and propagate to the caller.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Returns every cached quote, one per currency, in no particular
    /// order.
    fn get_all(&self) -> Result<Vec<Quote>>;

    /// Inserts or replaces quotes keyed by currency code.
    ///
    /// Implementations stamp `cached_at` with the current time at the
    /// moment of the call; the provider's own timestamp travels separately
    /// on the quote. Returns the number of rows written.
    async fn upsert_many(&self, quotes: &[NewQuote]) -> Result<usize>;
}
