//! Domain models for the checkout service.

pub mod gateway;
pub mod identity;
pub mod locale;
pub mod payload;
pub mod quote;

pub use gateway::{GatewayFailure, GatewayResponse, GatewayResult};
pub use identity::{IdentityPolicy, PayerIdentity};
pub use locale::LocaleResolver;
pub use payload::CheckoutPayload;
pub use quote::{BasePrice, PricingQuote};
