//! AwesomeAPI currency quote provider.
//!
//! Fetches the latest quote for a batch of currency pairs in a single
//! request against `https://economia.awesomeapi.com.br/json/last/`.
//! An optional `token` query parameter raises the rate limit.
//!
//! Note: unlike some consumers of this API, certificate validation is
//! left enabled on the underlying client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::errors::MarketDataError;

const BASE_URL: &str = "https://economia.awesomeapi.com.br/json/last";
const PROVIDER_ID: &str = "AWESOME_API";

/// Outbound request budget; a slow provider resolves to an error rather
/// than holding the request open.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// API Response Structures
// ============================================================================

/// One pair entry in the `/json/last` response object.
#[derive(Debug, Deserialize)]
struct PairQuoteRaw {
    /// Bid price as a decimal string
    bid: String,
    /// Ask price as a decimal string
    ask: String,
    /// Percent change as a decimal string
    #[serde(rename = "pctChange")]
    pct_change: String,
    /// Provider-side quote creation timestamp
    create_date: Option<String>,
}

/// A parsed quote for one currency pair against the reference currency.
#[derive(Debug, Clone, PartialEq)]
pub struct PairQuote {
    pub code: String,
    pub bid: f64,
    pub ask: f64,
    pub pct_change: f64,
    pub create_date: Option<String>,
}

pub struct AwesomeApiClient {
    client: Client,
    token: Option<String>,
}

impl AwesomeApiClient {
    pub fn new(token: Option<String>) -> Result<Self, MarketDataError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(AwesomeApiClient { client, token })
    }

    /// Fetches the latest quotes for every `<code>-<reference>` pair in a
    /// single batched request.
    pub async fn fetch_latest(
        &self,
        codes: &[&str],
        reference: &str,
    ) -> Result<Vec<PairQuote>, MarketDataError> {
        let pairs = codes
            .iter()
            .map(|code| format!("{}-{}", code, reference))
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/{}", BASE_URL, pairs);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }

        let response = request.send().await?;
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let body = response.text().await?;
        parse_latest_payload(&body, reference)
    }
}

/// Parses the `/json/last` payload: an object keyed by the concatenated
/// pair (`USDBRL`), each value carrying string-encoded prices. A top-level
/// `status` key is the provider's error marker. Entries that fail to
/// deserialize are skipped.
fn parse_latest_payload(
    body: &str,
    reference: &str,
) -> Result<Vec<PairQuote>, MarketDataError> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| MarketDataError::ParsingError(e.to_string()))?;

    let entries = payload
        .as_object()
        .ok_or_else(|| MarketDataError::ParsingError("payload is not an object".to_string()))?;

    if entries.contains_key("status") {
        let message = entries
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("provider reported an error");
        return Err(MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: message.to_string(),
        });
    }

    let mut quotes = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let raw: PairQuoteRaw = match serde_json::from_value(value.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping malformed quote entry {}: {}", key, e);
                continue;
            }
        };
        let code = key.strip_suffix(reference).unwrap_or(key.as_str());
        quotes.push(PairQuote {
            code: code.to_string(),
            bid: raw.bid.parse().unwrap_or_default(),
            ask: raw.ask.parse().unwrap_or_default(),
            pct_change: raw.pct_change.parse().unwrap_or_default(),
            create_date: raw.create_date,
        });
    }

    Ok(quotes)
}
