use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod convert;
mod currencies;
mod quotes;

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/quotes", get(quotes::get_quotes))
        .route("/api/rates", get(quotes::get_rates))
        .route("/api/convert", get(convert::convert))
        .route("/api/currencies", get(currencies::list_currencies))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
