//! SQLite-backed quote cache.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use log::debug;

use cambio_core::quotes::{NewQuote, Quote, QuoteStore};
use cambio_core::Result;

use super::model::QuoteDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::quotes::dsl as quotes_dsl;

pub struct QuoteRepository {
    pool: Arc<DbPool>,
}

impl QuoteRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuoteStore for QuoteRepository {
    fn get_all(&self) -> Result<Vec<Quote>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = quotes_dsl::quotes
            .select(QuoteDB::as_select())
            .load::<QuoteDB>(&mut conn)
            .map_err(StorageError::QueryFailed)?;

        Ok(rows.into_iter().filter_map(QuoteDB::into_domain).collect())
    }

    async fn upsert_many(&self, quotes: &[NewQuote]) -> Result<usize> {
        if quotes.is_empty() {
            return Ok(0);
        }

        let cached_at = Utc::now().naive_utc();
        let rows: Vec<QuoteDB> = quotes
            .iter()
            .map(|quote| QuoteDB {
                code: quote.currency.as_str().to_string(),
                bid: quote.bid,
                ask: quote.ask,
                pct_change: quote.pct_change,
                provider_timestamp: quote.provider_timestamp.clone(),
                cached_at,
            })
            .collect();

        let mut conn = get_connection(&self.pool)?;
        let written = conn
            .transaction(|conn| {
                diesel::replace_into(quotes_dsl::quotes)
                    .values(&rows)
                    .execute(conn)
            })
            .map_err(StorageError::QueryFailed)?;

        debug!("Upserted {} quotes", written);
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use cambio_core::currencies::CurrencyCode;
    use tempfile::TempDir;

    fn setup() -> (TempDir, QuoteRepository) {
        let dir = TempDir::new().unwrap();
        let db_path = dir
            .path()
            .join("cambio.db")
            .to_str()
            .unwrap()
            .to_string();
        db::init(&db_path).unwrap();
        let pool = db::create_pool(&db_path).unwrap();
        db::run_migrations(&pool).unwrap();
        (dir, QuoteRepository::new(pool))
    }

    fn usd_quote(bid: f64) -> NewQuote {
        NewQuote {
            currency: CurrencyCode::Usd,
            bid,
            ask: bid + 0.01,
            pct_change: 0.25,
            provider_timestamp: "2026-02-10 13:00:00".to_string(),
        }
    }

    #[test]
    fn test_empty_store_reads_empty() {
        let (_dir, repository) = setup();
        assert!(repository.get_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_then_get_all_roundtrip() {
        let (_dir, repository) = setup();

        let written = repository
            .upsert_many(&[
                usd_quote(5.10),
                NewQuote {
                    currency: CurrencyCode::Eur,
                    bid: 6.20,
                    ask: 6.22,
                    pct_change: -0.40,
                    provider_timestamp: "2026-02-10 13:00:00".to_string(),
                },
            ])
            .await
            .unwrap();
        assert_eq!(written, 2);

        let quotes = repository.get_all().unwrap();
        assert_eq!(quotes.len(), 2);
        let usd = quotes
            .iter()
            .find(|quote| quote.currency == CurrencyCode::Usd)
            .unwrap();
        assert_eq!(usd.bid, 5.10);
        assert_eq!(usd.provider_timestamp, "2026-02-10 13:00:00");
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent_per_code() {
        let (_dir, repository) = setup();

        repository.upsert_many(&[usd_quote(5.10)]).await.unwrap();
        let first = repository.get_all().unwrap().remove(0);

        std::thread::sleep(std::time::Duration::from_millis(20));

        repository.upsert_many(&[usd_quote(5.10)]).await.unwrap();
        let quotes = repository.get_all().unwrap();

        assert_eq!(quotes.len(), 1);
        // cached_at reflects the second write, not the first
        assert!(quotes[0].cached_at > first.cached_at);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_values() {
        let (_dir, repository) = setup();

        repository.upsert_many(&[usd_quote(5.10)]).await.unwrap();
        repository.upsert_many(&[usd_quote(4.95)]).await.unwrap();

        let quotes = repository.get_all().unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].bid, 4.95);
    }

    #[tokio::test]
    async fn test_unknown_codes_are_skipped_on_read() {
        let (_dir, repository) = setup();
        repository.upsert_many(&[usd_quote(5.10)]).await.unwrap();

        let mut conn = get_connection(&repository.pool).unwrap();
        diesel::insert_into(quotes_dsl::quotes)
            .values(QuoteDB {
                code: "XYZ".to_string(),
                bid: 1.0,
                ask: 1.0,
                pct_change: 0.0,
                provider_timestamp: "2026-02-10 13:00:00".to_string(),
                cached_at: Utc::now().naive_utc(),
            })
            .execute(&mut conn)
            .unwrap();

        let quotes = repository.get_all().unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].currency, CurrencyCode::Usd);
    }
}
