//! # Checkout Remote
//!
//! Concrete outbound adapters for the checkout service.
//! This crate provides HTTP clients that implement the `ExchangeRateProvider`
//! and `PaymentGateway` ports.
//!
//! Both adapters perform exactly one request per call, never retry, and rely on
//! the timeout configured on the shared `reqwest::Client`.

use std::time::Duration;

pub mod exchange;
pub mod gateway;

pub use exchange::{DEFAULT_RATE_API_URL, ExchangeRateApiClient};
pub use gateway::{DEFAULT_GATEWAY_URL, ZenoPayClient};

/// Timeout applied to every outbound call when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the HTTP client shared by the outbound adapters.
///
/// The timeout covers the whole request (connect, send, and body read) so a
/// slow provider cannot stall an inbound request indefinitely.
///
/// # Examples
///
/// ```ignore
/// let http = build_http_client(Duration::from_secs(5))?;
/// let rates = ExchangeRateApiClient::new(http.clone(), DEFAULT_RATE_API_URL, api_key);
/// ```
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
}

/// Renders a reqwest error for logs without the request URL.
///
/// Rate provider URLs embed the API key in the path.
pub(crate) fn describe(err: reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err.without_url())
    } else {
        err.without_url().to_string()
    }
}
