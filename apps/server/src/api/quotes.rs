use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use cambio_core::fx::RateTable;
use cambio_core::quotes::{Quote, QuoteSnapshot};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub(crate) struct QuotesQuery {
    #[serde(default)]
    refresh: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuotesResponse {
    quotes: Vec<Quote>,
    rates: RateTable,
    refresh_allowed: bool,
    cooldown_remaining_secs: i64,
}

/// Serve the cached quote set, optionally asking for a refresh first.
pub async fn get_quotes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuotesQuery>,
) -> ApiResult<Json<QuotesResponse>> {
    let QuoteSnapshot {
        quotes,
        refresh_allowed,
        cooldown_remaining_secs,
    } = state.quote_service.snapshot(query.refresh).await?;

    let rates = RateTable::from_quotes(&quotes);
    Ok(Json(QuotesResponse {
        quotes,
        rates,
        refresh_allowed,
        cooldown_remaining_secs,
    }))
}

/// Serve the conversion-rate table alone.
pub async fn get_rates(State(state): State<Arc<AppState>>) -> ApiResult<Json<RateTable>> {
    let snapshot = state.quote_service.snapshot(false).await?;
    Ok(Json(RateTable::from_quotes(&snapshot.quotes)))
}
