//! Checkout Application Service
//!
//! Orchestrates pricing, payload assembly and the gateway call through the ports.
//! Contains NO infrastructure logic - pure business orchestration.

use tracing::{error, info, instrument, warn};

use checkout_types::{
    AppError, ExchangeRateProvider, GatewayResult, LocaleResolver, PaymentGateway, PricingQuote,
};

use crate::checkout::{CheckoutBuilder, RequestOrigin};
use crate::pricing::PricingPipeline;
use crate::settings::CheckoutSettings;

/// Everything the inbound adapter extracts from a `POST /pay` request.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub phone: Option<String>,
    pub locale: Option<String>,
    pub origin: RequestOrigin,
}

/// Application service for checkout operations.
///
/// Generic over `P: ExchangeRateProvider` and `G: PaymentGateway` - the adapters
/// are injected at compile time. This enables:
/// - Swapping providers without code changes
/// - Testing with in-memory fakes
/// - Compile-time checks for port implementation
pub struct CheckoutService<P: ExchangeRateProvider, G: PaymentGateway> {
    pricing: PricingPipeline<P>,
    gateway: G,
    builder: CheckoutBuilder,
    settings: CheckoutSettings,
}

impl<P: ExchangeRateProvider, G: PaymentGateway> CheckoutService<P, G> {
    /// Creates a new checkout service with the given adapters.
    pub fn new(
        provider: P,
        gateway: G,
        resolver: LocaleResolver,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            pricing: PricingPipeline::new(provider, resolver),
            gateway,
            builder: CheckoutBuilder::new(
                settings.email_domain.clone(),
                settings.confirmation_path.clone(),
            ),
            settings,
        }
    }

    pub fn settings(&self) -> &CheckoutSettings {
        &self.settings
    }

    pub fn pricing(&self) -> &PricingPipeline<P> {
        &self.pricing
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Pricing
    // ─────────────────────────────────────────────────────────────────────────────

    /// Quotes the base price for a payer in `locale`. Never fails.
    pub async fn quote(&self, locale: Option<&str>) -> PricingQuote {
        self.pricing.price(locale, self.settings.base_price).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Checkout
    // ─────────────────────────────────────────────────────────────────────────────

    /// Prices the checkout, asks the gateway for a payment link and returns it.
    ///
    /// Identity and origin are checked before any remote call is made.
    #[instrument(skip(self, intent), fields(locale = ?intent.locale, policy = self.settings.identity_policy.name()))]
    pub async fn pay(&self, intent: PaymentIntent) -> Result<String, AppError> {
        let identity = self
            .settings
            .identity_policy
            .check(intent.phone.as_deref())
            .inspect_err(|e| warn!("Rejected checkout: {}", e))?;

        let redirect_url = self.builder.redirect_url(&intent.origin)?;

        let quote = self.quote(intent.locale.as_deref()).await;
        let payload = self.builder.build(quote, identity.as_ref(), redirect_url);

        let outcome = self
            .gateway
            .create_checkout(&payload)
            .await
            .inspect_err(|e| error!("An error occurred with the payment gateway: {}", e));

        match GatewayResult::translate(outcome) {
            GatewayResult::Success { payment_link } => {
                info!(quote = %quote, "Payment link issued");
                Ok(payment_link)
            }
            GatewayResult::Failure(failure) => {
                warn!(reason = failure.reason(), "Checkout failed");
                Err(failure.into())
            }
        }
    }
}
