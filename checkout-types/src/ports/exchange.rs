//! Exchange rate provider port.
//!
//! This trait defines the interface for exchange rate services.
//! Implementations can be HTTP clients, mock providers, etc.

use exchange_rates::{ConversionRate, CurrencyCode};

/// Error type for exchange rate operations.
///
/// Every variant means "no rate for this request"; none of them reach the payer.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("No exchange rate credential configured")]
    MissingCredential,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Malformed rate response for {from} -> {to}: {reason}")]
    MalformedResponse {
        from: CurrencyCode,
        to: CurrencyCode,
        reason: String,
    },
}

impl ExchangeError {
    /// True for configuration gaps, which are expected and not worth a warning.
    pub fn is_configuration_gap(&self) -> bool {
        matches!(self, ExchangeError::MissingCredential)
    }
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync + 'static {
    /// Get the exchange rate from one currency to another.
    /// Returns how many units of `to` currency you get for 1 unit of `from` currency.
    ///
    /// Performs at most one remote call and never retries.
    async fn get_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<ConversionRate, ExchangeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_missing_credential_is_a_configuration_gap() {
        assert!(ExchangeError::MissingCredential.is_configuration_gap());
        assert!(!ExchangeError::ServiceUnavailable("timeout".into()).is_configuration_gap());
        assert!(
            !ExchangeError::MalformedResponse {
                from: CurrencyCode::USD,
                to: CurrencyCode::TZS,
                reason: "missing conversion_rate".into(),
            }
            .is_configuration_gap()
        );
    }
}
