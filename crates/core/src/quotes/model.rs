//! Quote domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::currencies::CurrencyCode;

/// One currency's cached quote against the reference currency.
///
/// Quotes are created and overwritten only by the refresh service through
/// the store's upsert; every other component reads them as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub currency: CurrencyCode,
    pub bid: f64,
    pub ask: f64,
    pub pct_change: f64,
    /// Timestamp reported by the provider, kept verbatim.
    pub provider_timestamp: String,
    /// When the store last wrote this entry. Stamped by the store on
    /// upsert, never by callers.
    pub cached_at: NaiveDateTime,
}

/// Input model for an upsert. `cached_at` is assigned by the store at
/// write time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuote {
    pub currency: CurrencyCode,
    pub bid: f64,
    pub ask: f64,
    pub pct_change: f64,
    pub provider_timestamp: String,
}

impl NewQuote {
    pub fn into_quote(self, cached_at: NaiveDateTime) -> Quote {
        Quote {
            currency: self.currency,
            bid: self.bid,
            ask: self.ask,
            pct_change: self.pct_change,
            provider_timestamp: self.provider_timestamp,
            cached_at,
        }
    }
}
