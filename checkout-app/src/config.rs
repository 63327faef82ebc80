//! Configuration loading from environment.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use rust_decimal::Decimal;

use checkout_hex::settings::{
    DEFAULT_CONFIRMATION_PATH, DEFAULT_EMAIL_DOMAIN, DEFAULT_LOCALE_HEADER,
};
use checkout_remote::{DEFAULT_GATEWAY_URL, DEFAULT_RATE_API_URL};
use checkout_types::domain::locale::DEFAULT_TERRITORY;
use checkout_types::{BasePrice, CurrencyCode, IdentityPolicy};

const DEFAULT_BASE_PRICE: &str = "2.50";
const DEFAULT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_RATE_LIMIT: u32 = 100;

/// Application configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub gateway_api_key: String,
    pub gateway_url: String,
    pub rate_api_key: Option<String>,
    pub rate_api_url: String,
    pub base_price: BasePrice,
    pub outbound_timeout: Duration,
    pub default_territory: Option<String>,
    pub territory_overrides: Vec<(String, CurrencyCode)>,
    pub locale_header: String,
    pub confirmation_path: String,
    pub email_domain: String,
    pub identity_policy: IdentityPolicy,
    pub rate_limit_per_minute: u32,
    pub trust_proxy: bool,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| {
            get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or_default = |key: &str, default: &str| var(key).unwrap_or_else(|| default.into());

        let port = parse_or(var("PORT"), 3000u16, "PORT")?;

        let gateway_api_key = var("ZENOPAY_API_KEY")
            .ok_or_else(|| anyhow!("ZENOPAY_API_KEY environment variable is required"))?;

        let base_price = or_default("BASE_PRICE_USD", DEFAULT_BASE_PRICE);
        let base_price = Decimal::from_str(&base_price)
            .with_context(|| format!("BASE_PRICE_USD is not a decimal: {}", base_price))?;
        let base_price = BasePrice::new(base_price)
            .context("BASE_PRICE_USD must be positive")?;

        let timeout_secs = parse_or(
            var("OUTBOUND_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
            "OUTBOUND_TIMEOUT_SECS",
        )?;
        if timeout_secs == 0 {
            bail!("OUTBOUND_TIMEOUT_SECS must be greater than zero");
        }

        // Present but empty means "no default territory"
        let default_territory = match get("DEFAULT_TERRITORY") {
            Some(value) => Some(value.trim().to_string()).filter(|t| !t.is_empty()),
            None => Some(DEFAULT_TERRITORY.to_string()),
        };

        let territory_overrides = match var("TERRITORY_CURRENCIES") {
            Some(raw) => parse_territory_currencies(&raw)?,
            None => Vec::new(),
        };

        let identity_policy = match var("PAYER_IDENTITY_POLICY") {
            Some(raw) => IdentityPolicy::from_str(&raw).map_err(|e| anyhow!(e))?,
            None => IdentityPolicy::default(),
        };
        let identity_policy = match (identity_policy, var("PAYER_IDENTITY_PREFIXES")) {
            (IdentityPolicy::Strict { .. }, Some(raw)) => IdentityPolicy::Strict {
                prefixes: parse_prefixes(&raw)?,
            },
            (policy, _) => policy,
        };

        let rate_limit_per_minute = parse_or(
            var("RATE_LIMIT_PER_MINUTE"),
            DEFAULT_RATE_LIMIT,
            "RATE_LIMIT_PER_MINUTE",
        )?;
        if rate_limit_per_minute == 0 {
            bail!("RATE_LIMIT_PER_MINUTE must be greater than zero");
        }

        Ok(Self {
            port,
            gateway_api_key,
            gateway_url: or_default("ZENOPAY_API_URL", DEFAULT_GATEWAY_URL),
            rate_api_key: var("EXCHANGE_RATE_API_KEY"),
            rate_api_url: or_default("EXCHANGE_RATE_API_URL", DEFAULT_RATE_API_URL),
            base_price,
            outbound_timeout: Duration::from_secs(timeout_secs),
            default_territory,
            territory_overrides,
            locale_header: or_default("LOCALE_HEADER", DEFAULT_LOCALE_HEADER)
                .to_ascii_lowercase(),
            confirmation_path: or_default("CONFIRMATION_PATH", DEFAULT_CONFIRMATION_PATH),
            email_domain: or_default("EMAIL_DOMAIN", DEFAULT_EMAIL_DOMAIN),
            identity_policy,
            rate_limit_per_minute,
            trust_proxy: parse_or(var("TRUST_PROXY"), false, "TRUST_PROXY")?,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}

fn parse_or<T>(raw: Option<String>, default: T, name: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, value)),
        None => Ok(default),
    }
}

/// Parses `TZ=TZS,CD=USD` into territory overrides.
fn parse_territory_currencies(raw: &str) -> anyhow::Result<Vec<(String, CurrencyCode)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let Some((territory, currency)) = entry.split_once('=') else {
                bail!("TERRITORY_CURRENCIES entry is not TERRITORY=CODE: {}", entry);
            };
            let territory = territory.trim();
            if territory.is_empty() {
                bail!("TERRITORY_CURRENCIES entry has no territory: {}", entry);
            }
            let currency = CurrencyCode::from_str(currency)
                .map_err(|e| anyhow!("TERRITORY_CURRENCIES: {}", e))?;
            Ok((territory.to_string(), currency))
        })
        .collect()
}

fn parse_prefixes(raw: &str) -> anyhow::Result<Vec<String>> {
    let prefixes: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();
    if prefixes.is_empty() {
        bail!("PAYER_IDENTITY_PREFIXES must list at least one prefix");
    }
    if let Some(bad) = prefixes
        .iter()
        .find(|p| !p.chars().all(|c| c.is_ascii_digit()))
    {
        bail!("PAYER_IDENTITY_PREFIXES entry is not numeric: {}", bad);
    }
    Ok(prefixes)
}
