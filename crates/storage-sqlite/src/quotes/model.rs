//! Database row model for cached quotes.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use cambio_core::currencies::CurrencyCode;
use cambio_core::quotes::Quote;

#[derive(Queryable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuoteDB {
    pub code: String,
    pub bid: f64,
    pub ask: f64,
    pub pct_change: f64,
    pub provider_timestamp: String,
    pub cached_at: NaiveDateTime,
}

impl QuoteDB {
    /// Converts a row into the domain quote. Rows with a code the registry
    /// does not recognize yield `None` and are skipped by readers.
    pub fn into_domain(self) -> Option<Quote> {
        let currency = CurrencyCode::from_code(&self.code)?;
        Some(Quote {
            currency,
            bid: self.bid,
            ask: self.ask,
            pct_change: self.pct_change,
            provider_timestamp: self.provider_timestamp,
            cached_at: self.cached_at,
        })
    }
}
