//! Checkout request builder.
//!
//! Turns a priced quote and the payer identity into the gateway payload.

use axum::http::Uri;
use chrono::{DateTime, Utc};

use checkout_types::{AppError, CheckoutPayload, PayerIdentity, PricingQuote};

/// Buyer name used when the payer gave no identity.
pub const PLACEHOLDER_NAME: &str = "Customer";

/// Buyer phone used when the payer gave no identity.
pub const PLACEHOLDER_PHONE: &str = "N/A";

/// Scheme and host of the inbound request, taken from its own headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    scheme: &'static str,
    host: String,
}

impl RequestOrigin {
    /// Builds an origin from the forwarded protocol and the request host.
    ///
    /// Only `http` and `https` are honoured; anything else falls back to `http`.
    pub fn new(scheme: Option<&str>, host: Option<&str>) -> Result<Self, AppError> {
        let scheme = match first_token(scheme).map(|s| s.to_ascii_lowercase()) {
            Some(s) if s == "https" => "https",
            _ => "http",
        };

        let host = first_token(host)
            .ok_or_else(|| AppError::BadRequest("request has no host".into()))?;

        let valid = host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'));
        if !valid {
            return Err(AppError::BadRequest(format!("invalid host: {}", host)));
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
        })
    }

    pub fn scheme(&self) -> &str {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

fn first_token(value: Option<&str>) -> Option<&str> {
    value
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Assembles gateway payloads.
#[derive(Debug, Clone)]
pub struct CheckoutBuilder {
    email_domain: String,
    confirmation_path: String,
}

impl CheckoutBuilder {
    pub fn new(email_domain: impl Into<String>, confirmation_path: impl Into<String>) -> Self {
        let confirmation_path = confirmation_path.into();
        let confirmation_path = if confirmation_path.starts_with('/') {
            confirmation_path
        } else {
            format!("/{}", confirmation_path)
        };
        Self {
            email_domain: email_domain.into(),
            confirmation_path,
        }
    }

    /// Absolute confirmation URL on the caller's own host.
    pub fn redirect_url(&self, origin: &RequestOrigin) -> Result<String, AppError> {
        Uri::builder()
            .scheme(origin.scheme())
            .authority(origin.host())
            .path_and_query(self.confirmation_path.as_str())
            .build()
            .map(|uri| uri.to_string())
            .map_err(|e| AppError::BadRequest(format!("cannot build redirect url: {}", e)))
    }

    pub fn build(
        &self,
        quote: PricingQuote,
        identity: Option<&PayerIdentity>,
        redirect_url: String,
    ) -> CheckoutPayload {
        self.build_at(quote, identity, redirect_url, Utc::now())
    }

    /// Same as [`build`](Self::build) with an explicit clock for the placeholder email.
    pub fn build_at(
        &self,
        quote: PricingQuote,
        identity: Option<&PayerIdentity>,
        redirect_url: String,
        now: DateTime<Utc>,
    ) -> CheckoutPayload {
        let (buyer_name, buyer_phone, email_local) = match identity {
            Some(identity) => (
                identity.to_string(),
                identity.to_string(),
                identity.to_string(),
            ),
            None => (
                PLACEHOLDER_NAME.to_string(),
                PLACEHOLDER_PHONE.to_string(),
                format!("customer-{}", now.timestamp_millis()),
            ),
        };

        CheckoutPayload {
            amount: quote.amount(),
            currency: quote.currency(),
            buyer_name,
            buyer_email: format!("{}@{}", email_local, self.email_domain),
            buyer_phone,
            redirect_url,
        }
    }
}
