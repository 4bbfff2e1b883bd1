use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use cambio_core::quotes::{MarketDataClient, QuoteService, QuoteServiceTrait};
use cambio_storage_sqlite::{db, QuoteRepository};

use crate::config::Config;

pub struct AppState {
    pub quote_service: Arc<dyn QuoteServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    db::init(&config.db_path)?;
    let pool = db::create_pool(&config.db_path)?;
    db::run_migrations(&pool)?;

    let store = Arc::new(QuoteRepository::new(pool));
    let provider = Arc::new(MarketDataClient::new(config.api_key.clone())?);
    let quote_service = Arc::new(QuoteService::new(store, provider));

    Ok(Arc::new(AppState { quote_service }))
}
