//! HTTP adapter for the hosted-checkout payment gateway.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use checkout_types::{CheckoutPayload, GatewayError, GatewayResponse, PaymentGateway};

use crate::describe;

/// Base URL of the gateway's payments API.
pub const DEFAULT_GATEWAY_URL: &str = "https://zenoapi.com/api/payments";

/// ZenoPay multi-currency checkout client.
pub struct ZenoPayClient {
    http: reqwest::Client,
    checkout_url: String,
    api_key: String,
}

impl ZenoPayClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http,
            checkout_url: format!("{}/checkout/", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for ZenoPayClient {
    #[instrument(skip(self, payload), fields(amount = %payload.amount, currency = %payload.currency))]
    async fn create_checkout(
        &self,
        payload: &CheckoutPayload,
    ) -> Result<GatewayResponse, GatewayError> {
        let resp = self
            .http
            .post(&self.checkout_url)
            .header("x-api-key", &self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(describe(e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Transport(describe(e)))?;

        debug!(%status, body = %body, "Gateway response");

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        link_from_body(&body)
    }
}

/// Reads `payment_link` out of a 2xx body.
///
/// Any body that parses (including an empty one) yields a response; only a
/// string link counts. Text that is not JSON at all is a decode error.
fn link_from_body(body: &str) -> Result<GatewayResponse, GatewayError> {
    if body.trim().is_empty() {
        return Ok(GatewayResponse::default());
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;

    Ok(GatewayResponse {
        payment_link: value
            .get("payment_link")
            .and_then(Value::as_str)
            .map(String::from),
    })
}
