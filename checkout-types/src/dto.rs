//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::PricingQuote;
use exchange_rates::CurrencyCode;

// ─────────────────────────────────────────────────────────────────────────────
// Checkout DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to start a checkout. Accepted as JSON or as an HTML form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PayRequest {
    /// Payer phone number, used as the payer identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "0712345678")]
    pub phone: Option<String>,
}

/// Response after the gateway issued a payment link.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayResponse {
    /// Hosted checkout page the payer should be sent to
    #[schema(example = "https://secure.zenopay.com/checkout/abc123")]
    pub payment_link: String,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Fixed, localized message
    pub error: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Pricing DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Price the caller would be charged right now.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    #[schema(value_type = f64, example = 6300)]
    pub amount: Decimal,
    pub currency: CurrencyCode,
}

impl From<PricingQuote> for QuoteResponse {
    fn from(quote: PricingQuote) -> Self {
        Self {
            amount: quote.amount(),
            currency: quote.currency(),
        }
    }
}
