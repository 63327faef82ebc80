//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use checkout_types::{CurrencyCode, ErrorResponse, PayRequest, PayResponse, QuoteResponse};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Start a checkout and receive a hosted payment link
///
/// The price is quoted in the payer's local currency when the edge platform
/// reports a supported territory and a live rate is available; otherwise the
/// base price in USD is used.
#[utoipa::path(
    post,
    path = "/pay",
    tag = "checkout",
    request_body(
        content = PayRequest,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    params(
        ("x-vercel-ip-country" = Option<String>, Header, description = "Caller territory (2 letters)")
    ),
    responses(
        (status = 200, description = "Payment link issued", body = PayResponse),
        (status = 400, description = "Invalid phone number or no payment link returned", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded"),
        (status = 500, description = "Payment gateway failure", body = ErrorResponse)
    )
)]
async fn pay() {}

/// Quote the price for the caller's territory
#[utoipa::path(
    get,
    path = "/api/quote",
    tag = "checkout",
    params(
        ("x-vercel-ip-country" = Option<String>, Header, description = "Caller territory (2 letters)")
    ),
    responses(
        (status = 200, description = "Current quote", body = QuoteResponse)
    )
)]
async fn quote() {}

/// OpenAPI documentation for the Checkout API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Checkout Orchestration API",
        version = "1.0.0",
        description = "Prices a checkout in the payer's local currency and exchanges it for a hosted payment link.\n\nCurrency conversion is best-effort: when it cannot be completed the base price in USD is charged.",
        license(name = "MIT"),
    ),
    paths(health, pay, quote),
    components(schemas(PayRequest, PayResponse, QuoteResponse, ErrorResponse, CurrencyCode)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "checkout", description = "Pricing and checkout operations"),
    )
)]
pub struct ApiDoc;
