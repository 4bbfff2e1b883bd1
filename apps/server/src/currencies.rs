//! Presentation metadata for supported currencies.
//!
//! Display labels, flags, and symbols are consumed by the dashboard; the
//! core registry stays pure data.

use serde::Serialize;

use cambio_core::currencies::CurrencyCode;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInfo {
    pub code: CurrencyCode,
    pub label: &'static str,
    pub flag: &'static str,
    pub symbol: &'static str,
    pub is_reference: bool,
}

pub fn currency_info(code: CurrencyCode) -> CurrencyInfo {
    let (label, flag, symbol) = match code {
        CurrencyCode::Brl => ("Real Brasileiro", "🇧🇷", "R$"),
        CurrencyCode::Usd => ("Dólar Americano", "🇺🇸", "$"),
        CurrencyCode::Eur => ("Euro", "🇪🇺", "€"),
        CurrencyCode::Gbp => ("Libra Esterlina", "🇬🇧", "£"),
        CurrencyCode::Jpy => ("Iene Japonês", "🇯🇵", "¥"),
        CurrencyCode::Cad => ("Dólar Canadense", "🇨🇦", "C$"),
        CurrencyCode::Aud => ("Dólar Australiano", "🇦🇺", "A$"),
        CurrencyCode::Chf => ("Franco Suíço", "🇨🇭", "CHF"),
        CurrencyCode::Cny => ("Yuan Chinês", "🇨🇳", "¥"),
    };
    CurrencyInfo {
        code,
        label,
        flag,
        symbol,
        is_reference: code.is_reference(),
    }
}

pub fn all_currencies() -> Vec<CurrencyInfo> {
    CurrencyCode::ALL.iter().copied().map(currency_info).collect()
}
