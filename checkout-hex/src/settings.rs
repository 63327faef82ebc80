//! Immutable checkout settings, built once at startup.

use checkout_types::{BasePrice, IdentityPolicy};

/// Page the gateway sends the payer back to after checkout.
pub const DEFAULT_CONFIRMATION_PATH: &str = "/uthibitisho.html";

/// Domain used for synthesized buyer emails.
pub const DEFAULT_EMAIL_DOMAIN: &str = "zenopay.com";

/// Header the hosting edge platform uses for the caller's territory.
pub const DEFAULT_LOCALE_HEADER: &str = "x-vercel-ip-country";

/// Process-wide checkout settings. Read-only after construction.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub base_price: BasePrice,
    pub identity_policy: IdentityPolicy,
    pub confirmation_path: String,
    pub email_domain: String,
    pub locale_header: String,
    /// Honour `X-Forwarded-*` headers. Only enable behind a proxy that overwrites them.
    pub trust_proxy: bool,
}

impl CheckoutSettings {
    /// Settings with every optional value at its default.
    pub fn new(base_price: BasePrice) -> Self {
        Self {
            base_price,
            identity_policy: IdentityPolicy::default(),
            confirmation_path: DEFAULT_CONFIRMATION_PATH.to_string(),
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
            locale_header: DEFAULT_LOCALE_HEADER.to_string(),
            trust_proxy: false,
        }
    }

    pub fn with_identity_policy(mut self, policy: IdentityPolicy) -> Self {
        self.identity_policy = policy;
        self
    }

    pub fn with_trust_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }
}
