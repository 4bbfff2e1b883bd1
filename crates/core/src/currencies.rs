//! Supported currency registry.
//!
//! The registry is a fixed, closed set of currency codes with one
//! designated reference currency. Display metadata (labels, flags,
//! symbols) is presentation data and lives with the server, not here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The currency all rates are expressed against. Its rate is always 1.0
/// and it is never cached as a quote.
pub const REFERENCE_CURRENCY: CurrencyCode = CurrencyCode::Brl;

/// ISO 4217 code of a supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Brl,
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Chf,
    Cny,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 9] = [
        CurrencyCode::Brl,
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
        CurrencyCode::Jpy,
        CurrencyCode::Cad,
        CurrencyCode::Aud,
        CurrencyCode::Chf,
        CurrencyCode::Cny,
    ];

    /// Returns the uppercase code string for this currency.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Brl => "BRL",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Cad => "CAD",
            CurrencyCode::Aud => "AUD",
            CurrencyCode::Chf => "CHF",
            CurrencyCode::Cny => "CNY",
        }
    }

    /// Looks up a code string. Unknown codes yield `None` so callers can
    /// skip them leniently.
    pub fn from_code(code: &str) -> Option<CurrencyCode> {
        match code {
            "BRL" => Some(CurrencyCode::Brl),
            "USD" => Some(CurrencyCode::Usd),
            "EUR" => Some(CurrencyCode::Eur),
            "GBP" => Some(CurrencyCode::Gbp),
            "JPY" => Some(CurrencyCode::Jpy),
            "CAD" => Some(CurrencyCode::Cad),
            "AUD" => Some(CurrencyCode::Aud),
            "CHF" => Some(CurrencyCode::Chf),
            "CNY" => Some(CurrencyCode::Cny),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        *self == REFERENCE_CURRENCY
    }

    /// Every supported currency except the reference, in registry order.
    pub fn tracked() -> impl Iterator<Item = CurrencyCode> {
        Self::ALL.iter().copied().filter(|code| !code.is_reference())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_roundtrip() {
        for code in CurrencyCode::ALL {
            assert_eq!(CurrencyCode::from_code(code.as_str()), Some(code));
        }
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        assert_eq!(CurrencyCode::from_code("XYZ"), None);
        assert_eq!(CurrencyCode::from_code("usd"), None);
        assert_eq!(CurrencyCode::from_code(""), None);
    }

    #[test]
    fn test_tracked_excludes_reference() {
        let tracked: Vec<CurrencyCode> = CurrencyCode::tracked().collect();
        assert_eq!(tracked.len(), CurrencyCode::ALL.len() - 1);
        assert!(!tracked.contains(&REFERENCE_CURRENCY));
    }

    #[test]
    fn test_serde_uses_code_string() {
        let json = serde_json::to_string(&CurrencyCode::Usd).unwrap();
        assert_eq!(json, "\"USD\"");
        let code: CurrencyCode = serde_json::from_str("\"CHF\"").unwrap();
        assert_eq!(code, CurrencyCode::Chf);
    }
}
