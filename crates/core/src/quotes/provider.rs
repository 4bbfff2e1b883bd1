//! External quote provider seam.

use async_trait::async_trait;

use super::model::NewQuote;
use crate::currencies::CurrencyCode;

/// Result of a provider fetch.
///
/// `Unavailable` covers every failure mode (transport error, timeout,
/// malformed body, provider-reported error) as well as a response with no
/// usable entries, so callers can tell "the provider gave us nothing"
/// apart from an ordinary quote set.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Quotes(Vec<NewQuote>),
    Unavailable,
}

/// A batched source of current quotes against the reference currency.
///
/// Fetch failures never surface as errors; they resolve to
/// [`FetchOutcome::Unavailable`] and the caller falls back to whatever is
/// cached.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_latest(&self, codes: &[CurrencyCode]) -> FetchOutcome;
}
