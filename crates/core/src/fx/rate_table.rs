//! Conversion-rate table derived from the cached quote set.

use std::collections::HashMap;

use serde::Serialize;

use crate::currencies::{CurrencyCode, REFERENCE_CURRENCY};
use crate::quotes::Quote;

/// Mapping from currency code to its value relative to the reference
/// currency.
///
/// The reference currency is always exactly 1.0. Currencies without a
/// cached quote are simply absent, and conversions involving them are
/// undefined rather than defaulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: HashMap<CurrencyCode, f64>,
}

impl RateTable {
    /// Builds the table from a quote set: reference at 1.0, every other
    /// present currency at its quote's bid.
    pub fn from_quotes(quotes: &[Quote]) -> Self {
        let mut rates = HashMap::with_capacity(quotes.len() + 1);
        rates.insert(REFERENCE_CURRENCY, 1.0);
        for quote in quotes {
            rates.insert(quote.currency, quote.bid);
        }
        Self { rates }
    }

    pub fn rate(&self, code: CurrencyCode) -> Option<f64> {
        self.rates.get(&code).copied()
    }

    /// Converts an amount between two currencies via the reference rate.
    /// Returns `None` when either currency has no usable rate.
    pub fn convert(&self, amount: f64, from: CurrencyCode, to: CurrencyCode) -> Option<f64> {
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        if to_rate == 0.0 {
            return None;
        }
        Some(amount * from_rate / to_rate)
    }
}
