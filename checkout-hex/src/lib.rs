//! # Checkout Hex
//!
//! Application service layer and HTTP adapter for the checkout service.
//!
//! ## Architecture
//!
//! - `pricing/` - Locale → currency → live rate → rounded quote, with safe fallback
//! - `checkout/` - Gateway payload assembly (identity, pseudo-email, redirect URL)
//! - `service/` - Application service (orchestrates pricing and the gateway call)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `P: ExchangeRateProvider` and `G: PaymentGateway`,
//! allowing different adapters to be injected.

pub mod checkout;
pub mod inbound;
pub mod openapi;
pub mod pricing;
pub mod service;
pub mod settings;

#[cfg(test)]
mod service_tests;

pub use checkout::{CheckoutBuilder, RequestOrigin};
pub use pricing::PricingPipeline;
pub use service::{CheckoutService, PaymentIntent};
pub use settings::CheckoutSettings;
