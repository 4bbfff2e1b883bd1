//! Market data client facade for the market-data crate.

use async_trait::async_trait;
use chrono::Utc;
use log::warn;

use cambio_market_data::{AwesomeApiClient, PairQuote};

use super::model::NewQuote;
use super::provider::{FetchOutcome, QuoteProvider};
use crate::currencies::{CurrencyCode, REFERENCE_CURRENCY};
use crate::errors::{Error, Result};

/// Facade over the AwesomeAPI client that applies the registry filter and
/// the soft-fail contract expected by the refresh service.
pub struct MarketDataClient {
    inner: AwesomeApiClient,
}

impl MarketDataClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        let inner = AwesomeApiClient::new(token)
            .map_err(|e| Error::Unexpected(format!("Failed to build quote client: {}", e)))?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl QuoteProvider for MarketDataClient {
    async fn fetch_latest(&self, codes: &[CurrencyCode]) -> FetchOutcome {
        let pair_codes: Vec<&str> = codes
            .iter()
            .filter(|code| !code.is_reference())
            .map(|code| code.as_str())
            .collect();
        if pair_codes.is_empty() {
            return FetchOutcome::Unavailable;
        }

        let entries = match self
            .inner
            .fetch_latest(&pair_codes, REFERENCE_CURRENCY.as_str())
            .await
        {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Quote provider unavailable: {}", e);
                return FetchOutcome::Unavailable;
            }
        };

        let quotes = quotes_from_pairs(entries);
        if quotes.is_empty() {
            FetchOutcome::Unavailable
        } else {
            FetchOutcome::Quotes(quotes)
        }
    }
}

/// Converts raw provider entries into domain quotes. Entries whose code
/// the registry does not recognize are dropped, and the reference currency
/// is never emitted. A missing provider timestamp is replaced with the
/// current time.
fn quotes_from_pairs(entries: Vec<PairQuote>) -> Vec<NewQuote> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let currency = CurrencyCode::from_code(&entry.code)?;
            if currency.is_reference() {
                return None;
            }
            Some(NewQuote {
                currency,
                bid: entry.bid,
                ask: entry.ask,
                pct_change: entry.pct_change,
                provider_timestamp: entry.create_date.unwrap_or_else(|| {
                    Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string()
                }),
            })
        })
        .collect()
}
