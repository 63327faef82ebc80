//! HTTP adapter for the exchange rate provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use checkout_types::{ConversionRate, CurrencyCode, ExchangeError, ExchangeRateProvider};

use crate::describe;

/// Public endpoint of the pair-conversion API.
pub const DEFAULT_RATE_API_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Body of `GET /{key}/pair/{from}/{to}`.
#[derive(Debug, Deserialize)]
struct PairResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default, rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    conversion_rate: Option<f64>,
}

/// Exchange rate client for the pair-conversion API.
///
/// Without an API key every lookup fails with `MissingCredential` and no
/// request is sent.
pub struct ExchangeRateApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ExchangeRateApiClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn pair_url(&self, api_key: &str, from: CurrencyCode, to: CurrencyCode) -> String {
        format!("{}/{}/pair/{}/{}", self.base_url, api_key, from, to)
    }
}

#[async_trait]
impl ExchangeRateProvider for ExchangeRateApiClient {
    #[instrument(skip(self), fields(from = %from, to = %to))]
    async fn get_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<ConversionRate, ExchangeError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ExchangeError::MissingCredential)?;

        if from == to {
            return ConversionRate::new(1.0).map_err(|e| ExchangeError::MalformedResponse {
                from,
                to,
                reason: e.to_string(),
            });
        }

        let resp = self
            .http
            .get(self.pair_url(api_key, from, to))
            .send()
            .await
            .map_err(|e| ExchangeError::ServiceUnavailable(describe(e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExchangeError::ServiceUnavailable(format!("HTTP {}", status)));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ExchangeError::ServiceUnavailable(describe(e)))?;

        let malformed = |reason: String| ExchangeError::MalformedResponse { from, to, reason };

        let pair: PairResponse =
            serde_json::from_str(&body).map_err(|e| malformed(e.to_string()))?;

        if pair.result.as_deref() == Some("error") {
            return Err(malformed(format!(
                "provider error: {}",
                pair.error_type.as_deref().unwrap_or("unknown")
            )));
        }

        let raw = pair
            .conversion_rate
            .ok_or_else(|| malformed("missing conversion_rate".into()))?;
        let rate = ConversionRate::new(raw).map_err(|e| malformed(e.to_string()))?;

        debug!(rate = %rate, "Fetched conversion rate");
        Ok(rate)
    }
}
