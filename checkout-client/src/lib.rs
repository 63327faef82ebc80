//! # Checkout Client SDK
//!
//! A typed Rust client for the Checkout API.

use checkout_types::{PayRequest, PayResponse, QuoteResponse};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Header the API reads the caller's territory from unless configured otherwise.
pub const DEFAULT_LOCALE_HEADER: &str = "x-vercel-ip-country";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Checkout API client.
pub struct CheckoutClient {
    base_url: String,
    locale_header: String,
    http: Client,
}

impl CheckoutClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            locale_header: DEFAULT_LOCALE_HEADER.to_string(),
            http: Client::new(),
        }
    }

    /// Overrides the header used to send a territory signal.
    pub fn with_locale_header(mut self, header: impl Into<String>) -> Self {
        self.locale_header = header.into();
        self
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Starts a checkout and returns the hosted payment link.
    ///
    /// `locale` simulates the territory the edge platform would report.
    pub async fn pay(
        &self,
        phone: Option<&str>,
        locale: Option<&str>,
    ) -> Result<PayResponse, ClientError> {
        let body = PayRequest {
            phone: phone.map(String::from),
        };
        let req = self
            .http
            .post(format!("{}/pay", self.base_url))
            .json(&body);
        self.send(self.with_locale(req, locale)).await
    }

    /// Fetches the price a payer in `locale` would be charged.
    pub async fn quote(&self, locale: Option<&str>) -> Result<QuoteResponse, ClientError> {
        let req = self.http.get(format!("{}/api/quote", self.base_url));
        self.send(self.with_locale(req, locale)).await
    }

    fn with_locale(&self, req: RequestBuilder, locale: Option<&str>) -> RequestBuilder {
        match locale {
            Some(locale) => req.header(self.locale_header.as_str(), locale),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_types::CurrencyCode;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_with_trailing_slash() {
        let client = CheckoutClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_pay_sends_phone_and_locale() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pay"))
            .and(header("x-vercel-ip-country", "TZ"))
            .and(body_json(serde_json::json!({"phone": "0712345678"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"payment_link": "https://pay.example/x"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = CheckoutClient::new(server.uri());
        let resp = client.pay(Some("0712345678"), Some("TZ")).await.unwrap();
        assert_eq!(resp.payment_link, "https://pay.example/x");
    }

    #[tokio::test]
    async fn test_pay_error_surfaces_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pay"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "hapana"})),
            )
            .mount(&server)
            .await;

        let client = CheckoutClient::new(server.uri());
        match client.pay(None, None).await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "hapana");
            }
            other => panic!("expected API error, got {:?}", other.map(|r| r.payment_link)),
        }
    }

    #[tokio::test]
    async fn test_quote_uses_custom_locale_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/quote"))
            .and(header("cf-ipcountry", "KE"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"amount": 400.0, "currency": "KES"})),
            )
            .mount(&server)
            .await;

        let client = CheckoutClient::new(server.uri()).with_locale_header("cf-ipcountry");
        let quote = client.quote(Some("KE")).await.unwrap();
        assert_eq!(quote.currency, CurrencyCode::KES);
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(CheckoutClient::new(server.uri()).health().await.unwrap());
    }
}
