//! Currency Catalog and Local-Price Rounding
//!
//! This library owns the set of currencies the checkout can quote in, the
//! rounding class of each one, and the arithmetic that turns a USD base price
//! and a live conversion rate into a "round" local amount.
//!
//! Currencies are defined declaratively with a macro that generates the
//! `CurrencyCode` enum and all of its lookups.
//!
//! # Adding a New Currency
//! Simply add a line to the `define_currencies!` macro invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     MWK => ("MWK", "MK", Rounding::Hundreds),
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{ConversionRate, CurrencyCode, normalize};
//! use rust_decimal::Decimal;
//!
//! let base = Decimal::new(250, 2); // $2.50
//! let rate = ConversionRate::new(2500.0).unwrap();
//!
//! // 6250 TZS rounds up to the next hundred
//! assert_eq!(normalize(base, rate, CurrencyCode::TZS), Decimal::from(6300));
//! ```

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

// ─────────────────────────────────────────────────────────────────────────────
// Rounding Classes
// ─────────────────────────────────────────────────────────────────────────────

/// How a converted amount is rounded before it is quoted to a payer.
///
/// Rounding is always upward so the merchant never under-collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round up to the next whole unit.
    Unit,
    /// Round up to the next multiple of 100 (small-denomination currencies).
    Hundreds,
}

impl Rounding {
    /// Applies the rounding rule to a raw converted amount.
    pub fn apply(&self, raw: Decimal) -> Decimal {
        match self {
            Rounding::Unit => raw.ceil(),
            Rounding::Hundreds => {
                let hundred = Decimal::ONE_HUNDRED;
                (raw / hundred).ceil().saturating_mul(hundred)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines all currencies, CurrencyCode enum, and lookups
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define currencies with auto-generated enum variants and lookups.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     CurrencyName => ("CODE", "SYMBOL", Rounding::Class),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $rounding:expr)
        ),* $(,)?
    ) => {
        /// Currencies the checkout can quote in.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            /// Rounding class used when quoting a converted amount.
            pub fn rounding(&self) -> $crate::Rounding {
                match self {
                    $(CurrencyCode::$name => $rounding),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err(format!("Unknown currency: {}", s)),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", "$", Rounding::Unit),
    TZS => ("TZS", "TSh", Rounding::Hundreds),
    KES => ("KES", "KSh", Rounding::Hundreds),
    UGX => ("UGX", "USh", Rounding::Hundreds),
    NGN => ("NGN", "₦", Rounding::Unit),
    ZAR => ("ZAR", "R", Rounding::Unit),
    RWF => ("RWF", "FRw", Rounding::Hundreds),
    GHS => ("GHS", "GH₵", Rounding::Unit),
}

impl CurrencyCode {
    /// The reference currency every base price is denominated in.
    pub const BASE: CurrencyCode = CurrencyCode::USD;
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion Rate
// ─────────────────────────────────────────────────────────────────────────────

/// Error returned when a provider hands back an unusable rate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid conversion rate: {0}")]
pub struct InvalidRate(pub f64);

/// A USD → target multiplier.
///
/// Always finite and strictly positive. Lives for a single pricing request.
#[derive(Clone, Copy, PartialEq)]
pub struct ConversionRate {
    raw: f64,
    decimal: Decimal,
}

impl ConversionRate {
    /// Validates a raw provider rate.
    pub fn new(raw: f64) -> Result<Self, InvalidRate> {
        if !raw.is_finite() || raw <= 0.0 {
            return Err(InvalidRate(raw));
        }
        let decimal = Decimal::from_f64(raw)
            .filter(|d| d.is_sign_positive() && !d.is_zero())
            .ok_or(InvalidRate(raw))?;
        Ok(Self { raw, decimal })
    }

    pub fn value(&self) -> f64 {
        self.raw
    }

    pub fn as_decimal(&self) -> Decimal {
        self.decimal
    }
}

impl fmt::Debug for ConversionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConversionRate({})", self.decimal)
    }
}

impl fmt::Display for ConversionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.decimal)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Price Normalization
// ─────────────────────────────────────────────────────────────────────────────

/// Converts a USD base price into `currency` and rounds it to a quotable amount.
///
/// The rounding class comes from the currency table, so reclassifying a
/// currency never touches this function.
pub fn normalize(base: Decimal, rate: ConversionRate, currency: CurrencyCode) -> Decimal {
    let raw = base.saturating_mul(rate.as_decimal());
    currency.rounding().apply(raw)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
