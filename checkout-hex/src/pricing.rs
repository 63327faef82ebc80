//! Pricing pipeline: locale → currency → live rate → rounded local quote.
//!
//! The pipeline is total. Every internal failure collapses into the
//! safe-default quote (base price in USD) so conversion can never block a checkout.

use tracing::{debug, info, instrument, warn};

use checkout_types::{
    BasePrice, CurrencyCode, ExchangeError, ExchangeRateProvider, LocaleResolver, PricingQuote,
};
use exchange_rates::normalize;

/// Composes locale resolution, rate lookup and rounding.
pub struct PricingPipeline<P: ExchangeRateProvider> {
    provider: P,
    resolver: LocaleResolver,
}

impl<P: ExchangeRateProvider> PricingPipeline<P> {
    pub fn new(provider: P, resolver: LocaleResolver) -> Self {
        Self { provider, resolver }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    /// Prices `base` for a payer in `locale`. Never fails.
    #[instrument(skip(self, base), fields(base = %base))]
    pub async fn price(&self, locale: Option<&str>, base: BasePrice) -> PricingQuote {
        let currency = self.resolver.resolve(locale);
        if currency == CurrencyCode::BASE {
            debug!("Locale resolves to base currency, skipping conversion");
            return PricingQuote::safe_default(base);
        }

        match self.convert(base, currency).await {
            Ok(quote) => {
                info!(quote = %quote, "Quoted in local currency");
                quote
            }
            Err(ConversionFailure::Rate(e)) if e.is_configuration_gap() => {
                debug!(currency = %currency, "Conversion disabled: {}", e);
                PricingQuote::safe_default(base)
            }
            Err(e) => {
                warn!(currency = %currency, "Currency conversion failed, using base price: {}", e);
                PricingQuote::safe_default(base)
            }
        }
    }

    async fn convert(
        &self,
        base: BasePrice,
        currency: CurrencyCode,
    ) -> Result<PricingQuote, ConversionFailure> {
        let rate = self
            .provider
            .get_rate(CurrencyCode::BASE, currency)
            .await
            .map_err(ConversionFailure::Rate)?;

        let amount = normalize(base.amount(), rate, currency);
        PricingQuote::new(amount, currency).map_err(|e| ConversionFailure::Amount(e.to_string()))
    }
}

/// Internal to the pipeline; never returned to callers.
#[derive(Debug)]
enum ConversionFailure {
    Rate(ExchangeError),
    Amount(String),
}

impl std::fmt::Display for ConversionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionFailure::Rate(e) => write!(f, "{}", e),
            ConversionFailure::Amount(e) => write!(f, "{}", e),
        }
    }
}
