use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use cambio_core::currencies::CurrencyCode;
use cambio_core::fx::RateTable;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub(crate) struct ConvertQuery {
    amount: f64,
    from: String,
    to: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConvertResponse {
    amount: f64,
    from: CurrencyCode,
    to: CurrencyCode,
    converted: f64,
}

/// Convert an amount between two supported currencies using the current
/// rate table. Pairs without a cached rate are unavailable, not defaulted.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConvertQuery>,
) -> ApiResult<Json<ConvertResponse>> {
    let from = parse_code(&query.from)?;
    let to = parse_code(&query.to)?;

    let snapshot = state.quote_service.snapshot(false).await?;
    let rates = RateTable::from_quotes(&snapshot.quotes);
    let converted = rates.convert(query.amount, from, to).ok_or_else(|| {
        ApiError::UnprocessableEntity(format!("No rate available for {}/{}", from, to))
    })?;

    Ok(Json(ConvertResponse {
        amount: query.amount,
        from,
        to,
        converted,
    }))
}

fn parse_code(code: &str) -> Result<CurrencyCode, ApiError> {
    CurrencyCode::from_code(code)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown currency code '{}'", code)))
}
