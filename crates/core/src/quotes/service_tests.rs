//! Tests for the quote refresh service contract.
//!
//! These verify the per-request state machine: bootstrap on an empty
//! cache, cooldown gating, stale-preserving provider failures, and the
//! single-flight bound under concurrent refresh requests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};

use super::model::{NewQuote, Quote};
use super::provider::{FetchOutcome, QuoteProvider};
use super::service::{QuoteService, QuoteServiceTrait};
use super::store::QuoteStore;
use crate::currencies::{CurrencyCode, REFERENCE_CURRENCY};
use crate::errors::{DatabaseError, Error, Result};

// =========================================================================
// Mock QuoteStore
// =========================================================================

#[derive(Default)]
struct MockQuoteStore {
    quotes: Mutex<HashMap<CurrencyCode, Quote>>,
    fail_reads: AtomicBool,
}

impl MockQuoteStore {
    fn new() -> Self {
        Self::default()
    }

    fn seed(&self, currency: CurrencyCode, bid: f64, cached_at: NaiveDateTime) {
        let quote = Quote {
            currency,
            bid,
            ask: bid + 0.01,
            pct_change: 0.25,
            provider_timestamp: "2026-02-10 13:00:00".to_string(),
            cached_at,
        };
        self.quotes.lock().unwrap().insert(currency, quote);
    }

    fn contents(&self) -> Vec<Quote> {
        let mut quotes: Vec<Quote> = self.quotes.lock().unwrap().values().cloned().collect();
        quotes.sort_by_key(|quote| quote.currency.as_str());
        quotes
    }
}

#[async_trait]
impl QuoteStore for MockQuoteStore {
    fn get_all(&self) -> Result<Vec<Quote>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "disk I/O error".to_string(),
            )));
        }
        Ok(self.quotes.lock().unwrap().values().cloned().collect())
    }

    async fn upsert_many(&self, quotes: &[NewQuote]) -> Result<usize> {
        let cached_at = Utc::now().naive_utc();
        let mut map = self.quotes.lock().unwrap();
        for quote in quotes {
            map.insert(quote.currency, quote.clone().into_quote(cached_at));
        }
        Ok(quotes.len())
    }
}

// =========================================================================
// Mock QuoteProvider
// =========================================================================

struct MockProvider {
    calls: AtomicUsize,
    quotes: Option<Vec<NewQuote>>,
    delay: Option<StdDuration>,
}

impl MockProvider {
    fn returning(quotes: Vec<NewQuote>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            quotes: Some(quotes),
            delay: None,
        }
    }

    fn unavailable() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            quotes: None,
            delay: None,
        }
    }

    fn with_delay(mut self, delay: StdDuration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteProvider for MockProvider {
    async fn fetch_latest(&self, _codes: &[CurrencyCode]) -> FetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.quotes {
            Some(quotes) => FetchOutcome::Quotes(quotes.clone()),
            None => FetchOutcome::Unavailable,
        }
    }
}

fn new_quote(currency: CurrencyCode, bid: f64) -> NewQuote {
    NewQuote {
        currency,
        bid,
        ask: bid + 0.01,
        pct_change: 0.25,
        provider_timestamp: "2026-02-10 13:00:00".to_string(),
    }
}

fn provider_quotes() -> Vec<NewQuote> {
    vec![
        new_quote(CurrencyCode::Usd, 5.10),
        new_quote(CurrencyCode::Eur, 6.20),
    ]
}

// =========================================================================
// Bootstrap
// =========================================================================

#[tokio::test]
async fn test_bootstrap_populates_empty_store() {
    let store = Arc::new(MockQuoteStore::new());
    let provider = Arc::new(MockProvider::returning(provider_quotes()));
    let service = QuoteService::new(store.clone(), provider.clone());

    let snapshot = service.snapshot(false).await.unwrap();

    assert_eq!(provider.call_count(), 1);
    assert_eq!(snapshot.quotes.len(), 2);
    assert!(snapshot.refresh_allowed);
    assert_eq!(snapshot.cooldown_remaining_secs, 0);
    assert!(snapshot
        .quotes
        .iter()
        .all(|quote| quote.currency != REFERENCE_CURRENCY));
    assert_eq!(store.contents().len(), 2);
}

#[tokio::test]
async fn test_bootstrap_with_unavailable_provider_serves_nothing() {
    let store = Arc::new(MockQuoteStore::new());
    let provider = Arc::new(MockProvider::unavailable());
    let service = QuoteService::new(store.clone(), provider.clone());

    let snapshot = service.snapshot(false).await.unwrap();

    assert_eq!(provider.call_count(), 1);
    assert!(snapshot.quotes.is_empty());
    assert!(snapshot.refresh_allowed);
    assert!(store.contents().is_empty());
}

// =========================================================================
// Cooldown gating
// =========================================================================

#[tokio::test]
async fn test_refresh_disallowed_inside_cooldown_window() {
    let store = Arc::new(MockQuoteStore::new());
    let now = Utc::now().naive_utc();
    store.seed(CurrencyCode::Usd, 5.10, now - Duration::seconds(30));
    let provider = Arc::new(MockProvider::returning(provider_quotes()));
    let service = QuoteService::new(store.clone(), provider.clone());

    let snapshot = service.snapshot(true).await.unwrap();

    assert_eq!(provider.call_count(), 0);
    assert!(!snapshot.refresh_allowed);
    assert!(
        (29..=30).contains(&snapshot.cooldown_remaining_secs),
        "expected ~30s remaining, got {}",
        snapshot.cooldown_remaining_secs
    );
    assert_eq!(snapshot.quotes.len(), 1);
}

#[tokio::test]
async fn test_allowed_refresh_is_not_taken_unless_requested() {
    let store = Arc::new(MockQuoteStore::new());
    let now = Utc::now().naive_utc();
    store.seed(CurrencyCode::Usd, 5.10, now - Duration::seconds(75));
    let provider = Arc::new(MockProvider::returning(provider_quotes()));
    let service = QuoteService::new(store.clone(), provider.clone());

    let snapshot = service.snapshot(false).await.unwrap();

    assert_eq!(provider.call_count(), 0);
    assert!(snapshot.refresh_allowed);
    assert_eq!(snapshot.cooldown_remaining_secs, 0);
    assert_eq!(snapshot.quotes.len(), 1);
    assert_eq!(snapshot.quotes[0].bid, 5.10);
}

#[tokio::test]
async fn test_requested_refresh_merges_provider_quotes() {
    let store = Arc::new(MockQuoteStore::new());
    let now = Utc::now().naive_utc();
    store.seed(CurrencyCode::Usd, 4.90, now - Duration::seconds(90));
    let provider = Arc::new(MockProvider::returning(provider_quotes()));
    let service = QuoteService::new(store.clone(), provider.clone());

    let snapshot = service.snapshot(true).await.unwrap();

    assert_eq!(provider.call_count(), 1);
    assert!(snapshot.refresh_allowed);
    assert_eq!(snapshot.quotes.len(), 2);
    let usd = snapshot
        .quotes
        .iter()
        .find(|quote| quote.currency == CurrencyCode::Usd)
        .unwrap();
    assert_eq!(usd.bid, 5.10);
    assert!(usd.cached_at > now - Duration::seconds(5));
}

#[tokio::test]
async fn test_provider_failure_preserves_stale_cache() {
    let store = Arc::new(MockQuoteStore::new());
    let now = Utc::now().naive_utc();
    store.seed(CurrencyCode::Usd, 5.10, now - Duration::seconds(90));
    store.seed(CurrencyCode::Eur, 6.20, now - Duration::seconds(90));
    let before = store.contents();

    let provider = Arc::new(MockProvider::unavailable());
    let service = QuoteService::new(store.clone(), provider.clone());

    let snapshot = service.snapshot(true).await.unwrap();

    assert_eq!(provider.call_count(), 1);
    assert!(snapshot.refresh_allowed);
    assert_eq!(snapshot.cooldown_remaining_secs, 0);
    assert_eq!(store.contents(), before);
}

// =========================================================================
// Storage failures
// =========================================================================

#[tokio::test]
async fn test_storage_errors_propagate() {
    let store = Arc::new(MockQuoteStore::new());
    store.fail_reads.store(true, Ordering::SeqCst);
    let provider = Arc::new(MockProvider::returning(provider_quotes()));
    let service = QuoteService::new(store, provider);

    let result = service.snapshot(false).await;
    assert!(matches!(result, Err(Error::Database(_))));
}

// =========================================================================
// Single-flight under concurrency
// =========================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_refreshes_dispatch_one_fetch() {
    let store = Arc::new(MockQuoteStore::new());
    let now = Utc::now().naive_utc();
    store.seed(CurrencyCode::Usd, 4.90, now - Duration::seconds(120));

    let provider = Arc::new(
        MockProvider::returning(provider_quotes()).with_delay(StdDuration::from_millis(50)),
    );
    let service = Arc::new(QuoteService::new(store.clone(), provider.clone()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move { service.snapshot(true).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // The first request fetches and restamps the cache; the rest observe
    // an active cooldown and serve the fresh quotes unchanged.
    assert_eq!(provider.call_count(), 1);
    assert_eq!(store.contents().len(), 2);
}
