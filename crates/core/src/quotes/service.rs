//! Quote refresh service.
//!
//! Decides, per request, whether the cached quote set is fresh enough to
//! serve, whether the external provider may be called, and merges fresh
//! results back into the store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use log::{debug, warn};
use serde::Serialize;
use tokio::sync::Mutex;

use super::constants::COOLDOWN_WINDOW_SECS;
use super::model::Quote;
use super::provider::{FetchOutcome, QuoteProvider};
use super::store::QuoteStore;
use crate::currencies::CurrencyCode;
use crate::errors::Result;

/// The quote set served to the presentation layer, together with the
/// refresh decision that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSnapshot {
    pub quotes: Vec<Quote>,
    pub refresh_allowed: bool,
    /// Seconds until a refresh becomes permitted again. Zero whenever
    /// `refresh_allowed` is true.
    pub cooldown_remaining_secs: i64,
}

/// Request-facing surface of the quote cache.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Serves the current quote set, refreshing from the provider first
    /// when the cache is empty, or when the caller asked for a refresh and
    /// the cooldown window has elapsed.
    async fn snapshot(&self, refresh_requested: bool) -> Result<QuoteSnapshot>;
}

pub struct QuoteService {
    store: Arc<dyn QuoteStore>,
    provider: Arc<dyn QuoteProvider>,
    /// Serializes the read-decide-write sequence so concurrent requests
    /// dispatch at most one in-flight provider fetch.
    refresh_lock: Mutex<()>,
}

impl QuoteService {
    pub fn new(store: Arc<dyn QuoteStore>, provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            store,
            provider,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Fetches from the provider and merges any result into the store.
    /// Returns whether the store was written.
    async fn refresh_from_provider(&self) -> Result<bool> {
        let tracked: Vec<CurrencyCode> = CurrencyCode::tracked().collect();
        match self.provider.fetch_latest(&tracked).await {
            FetchOutcome::Quotes(quotes) => {
                let written = self.store.upsert_many(&quotes).await?;
                debug!("Refreshed {} quotes from provider", written);
                Ok(true)
            }
            FetchOutcome::Unavailable => {
                warn!("Quote provider unavailable; keeping cached quotes");
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn snapshot(&self, refresh_requested: bool) -> Result<QuoteSnapshot> {
        let _guard = self.refresh_lock.lock().await;

        let quotes = self.store.get_all()?;
        if quotes.is_empty() {
            // Bootstrap: nothing cached yet, fetch unconditionally. The
            // store may still end up empty if the provider is down too.
            self.refresh_from_provider().await?;
            return Ok(QuoteSnapshot {
                quotes: self.store.get_all()?,
                refresh_allowed: true,
                cooldown_remaining_secs: 0,
            });
        }

        let remaining = cooldown_remaining(&quotes, Utc::now().naive_utc());
        if remaining > 0 {
            return Ok(QuoteSnapshot {
                quotes,
                refresh_allowed: false,
                cooldown_remaining_secs: remaining,
            });
        }

        let quotes = if refresh_requested && self.refresh_from_provider().await? {
            self.store.get_all()?
        } else {
            quotes
        };

        Ok(QuoteSnapshot {
            quotes,
            refresh_allowed: true,
            cooldown_remaining_secs: 0,
        })
    }
}

/// Seconds left in the cooldown window, measured from the most recent
/// cache write. An empty quote set is infinitely stale and yields zero.
fn cooldown_remaining(quotes: &[Quote], now: NaiveDateTime) -> i64 {
    quotes
        .iter()
        .map(|quote| quote.cached_at)
        .max()
        .map(|last_sync| COOLDOWN_WINDOW_SECS - (now - last_sync).num_seconds())
        .map(|remaining| remaining.max(0))
        .unwrap_or(0)
}
