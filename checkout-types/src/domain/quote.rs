//! Price quotes handed from the pricing pipeline to the checkout builder.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use crate::error::DomainError;
use exchange_rates::CurrencyCode;

/// The canonical USD price before any local-currency conversion.
///
/// Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasePrice(Decimal);

impl BasePrice {
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount(amount));
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for BasePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CurrencyCode::BASE.symbol(), self.0)
    }
}

/// Amount and currency the payer will be charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PricingQuote {
    /// Amount in major units of `currency`
    #[schema(value_type = f64, example = 6300)]
    amount: Decimal,
    currency: CurrencyCode,
}

impl PricingQuote {
    /// Creates a quote, rejecting zero and negative amounts.
    pub fn new(amount: Decimal, currency: CurrencyCode) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount(amount));
        }
        Ok(Self { amount, currency })
    }

    /// The quote used whenever conversion cannot be completed.
    pub fn safe_default(base: BasePrice) -> Self {
        Self {
            amount: base.amount(),
            currency: CurrencyCode::BASE,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }

    pub fn is_base_currency(&self) -> bool {
        self.currency == CurrencyCode::BASE
    }
}

impl fmt::Display for PricingQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
