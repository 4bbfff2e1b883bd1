use axum::Json;

use crate::currencies::{all_currencies, CurrencyInfo};

/// List the supported currencies with their display metadata.
pub async fn list_currencies() -> Json<Vec<CurrencyInfo>> {
    Json(all_currencies())
}
