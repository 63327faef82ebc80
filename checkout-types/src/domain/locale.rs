//! Territory → currency resolution.

use std::collections::HashMap;

use exchange_rates::CurrencyCode;

/// Territories the checkout quotes in local currency out of the box.
pub const DEFAULT_TERRITORIES: &[(&str, CurrencyCode)] = &[
    ("TZ", CurrencyCode::TZS),
    ("KE", CurrencyCode::KES),
    ("UG", CurrencyCode::UGX),
    ("NG", CurrencyCode::NGN),
    ("ZA", CurrencyCode::ZAR),
    ("RW", CurrencyCode::RWF),
    ("GH", CurrencyCode::GHS),
];

/// Territory used when the edge platform sends no locale signal.
pub const DEFAULT_TERRITORY: &str = "KE";

/// Maps a 2-letter territory signal to the currency a payer is quoted in.
///
/// Lookups are case-sensitive. An absent signal is replaced by the default
/// territory; a present signal with no mapping resolves to the base currency.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    territories: HashMap<String, CurrencyCode>,
    default_territory: Option<String>,
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self {
            territories: DEFAULT_TERRITORIES
                .iter()
                .map(|(territory, currency)| (territory.to_string(), *currency))
                .collect(),
            default_territory: Some(DEFAULT_TERRITORY.to_string()),
        }
    }
}

impl LocaleResolver {
    /// Creates a resolver with an empty table.
    pub fn empty() -> Self {
        Self {
            territories: HashMap::new(),
            default_territory: None,
        }
    }

    /// Adds or replaces a territory mapping.
    pub fn with_territory(mut self, territory: impl Into<String>, currency: CurrencyCode) -> Self {
        self.territories.insert(territory.into(), currency);
        self
    }

    /// Sets the territory assumed when no signal is present.
    ///
    /// `None` (or a blank string) makes absent signals resolve to the base currency.
    pub fn with_default_territory(mut self, territory: Option<String>) -> Self {
        self.default_territory = territory
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    pub fn default_territory(&self) -> Option<&str> {
        self.default_territory.as_deref()
    }

    /// Resolves a locale signal to a currency. Never fails.
    pub fn resolve(&self, signal: Option<&str>) -> CurrencyCode {
        let territory = match signal.map(str::trim).filter(|s| !s.is_empty()) {
            Some(territory) => territory,
            None => match self.default_territory.as_deref() {
                Some(territory) => territory,
                None => return CurrencyCode::BASE,
            },
        };

        self.territories
            .get(territory)
            .copied()
            .unwrap_or(CurrencyCode::BASE)
    }
}
