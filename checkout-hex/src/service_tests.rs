//! CheckoutService and PricingPipeline unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use checkout_types::domain::locale::DEFAULT_TERRITORIES;
    use checkout_types::{
        AppError, BasePrice, CheckoutPayload, ConversionRate, CurrencyCode, ExchangeError,
        ExchangeRateProvider, GatewayError, GatewayResponse, IdentityPolicy, LocaleResolver,
        PaymentGateway, PricingQuote, Rounding,
    };

    use crate::{CheckoutService, CheckoutSettings, PaymentIntent, PricingPipeline, RequestOrigin};

    /// How the fake rate provider answers.
    #[derive(Clone, Copy)]
    pub enum RateMode {
        Rate(f64),
        MissingCredential,
        Unavailable,
        Malformed,
    }

    /// Rate provider that counts its calls.
    pub struct StubRates {
        mode: RateMode,
        calls: AtomicUsize,
    }

    impl StubRates {
        pub fn new(mode: RateMode) -> Self {
            Self {
                mode,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ExchangeRateProvider for StubRates {
        async fn get_rate(
            &self,
            from: CurrencyCode,
            to: CurrencyCode,
        ) -> Result<ConversionRate, ExchangeError> {
            if let RateMode::MissingCredential = self.mode {
                return Err(ExchangeError::MissingCredential);
            }
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                RateMode::Rate(raw) => Ok(ConversionRate::new(raw).unwrap()),
                RateMode::Unavailable => {
                    Err(ExchangeError::ServiceUnavailable("connection reset".into()))
                }
                RateMode::Malformed | RateMode::MissingCredential => {
                    Err(ExchangeError::MalformedResponse {
                        from,
                        to,
                        reason: "missing conversion_rate".into(),
                    })
                }
            }
        }
    }

    /// How the fake gateway answers.
    #[derive(Clone)]
    pub enum GatewayMode {
        Link(String),
        Empty,
        Down,
    }

    /// Gateway that records the last payload it received.
    pub struct StubGateway {
        mode: GatewayMode,
        calls: AtomicUsize,
        last_payload: Mutex<Option<CheckoutPayload>>,
    }

    impl StubGateway {
        pub fn new(mode: GatewayMode) -> Self {
            Self {
                mode,
                calls: AtomicUsize::new(0),
                last_payload: Mutex::new(None),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_payload(&self) -> Option<CheckoutPayload> {
            self.last_payload.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentGateway for StubGateway {
        async fn create_checkout(
            &self,
            payload: &CheckoutPayload,
        ) -> Result<GatewayResponse, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payload.lock().unwrap() = Some(payload.clone());
            match &self.mode {
                GatewayMode::Link(link) => Ok(GatewayResponse {
                    payment_link: Some(link.clone()),
                }),
                GatewayMode::Empty => Ok(GatewayResponse::default()),
                GatewayMode::Down => Err(GatewayError::Transport("connection refused".into())),
            }
        }
    }

    fn base() -> BasePrice {
        BasePrice::new(dec!(2.50)).unwrap()
    }

    fn pipeline(mode: RateMode) -> PricingPipeline<StubRates> {
        PricingPipeline::new(StubRates::new(mode), LocaleResolver::default())
    }

    fn service(
        rates: RateMode,
        gateway: GatewayMode,
        policy: IdentityPolicy,
    ) -> CheckoutService<StubRates, StubGateway> {
        CheckoutService::new(
            StubRates::new(rates),
            StubGateway::new(gateway),
            LocaleResolver::default(),
            CheckoutSettings::new(base()).with_identity_policy(policy),
        )
    }

    fn intent(phone: Option<&str>, locale: Option<&str>) -> PaymentIntent {
        PaymentIntent {
            phone: phone.map(String::from),
            locale: locale.map(String::from),
            origin: RequestOrigin::new(Some("https"), Some("shop.example.com")).unwrap(),
        }
    }

    fn expected_amount(base: Decimal, rate: Decimal, rounding: Rounding) -> Decimal {
        match rounding {
            Rounding::Hundreds => (base * rate / dec!(100)).ceil() * dec!(100),
            Rounding::Unit => (base * rate).ceil(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Pricing pipeline
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_supported_locales_are_converted_and_rounded() {
        for raw in [2500.0, 129.35, 13.7] {
            let pipeline = pipeline(RateMode::Rate(raw));
            let rate = ConversionRate::new(raw).unwrap().as_decimal();

            for (territory, currency) in DEFAULT_TERRITORIES {
                let quote = pipeline.price(Some(*territory), base()).await;
                assert_eq!(quote.currency(), *currency, "territory {}", territory);
                assert_eq!(
                    quote.amount(),
                    expected_amount(dec!(2.50), rate, currency.rounding()),
                    "territory {} at rate {}",
                    territory,
                    raw
                );
            }
        }
    }

    #[tokio::test]
    async fn test_missing_credential_falls_back_for_every_locale() {
        let pipeline = pipeline(RateMode::MissingCredential);
        for (territory, _) in DEFAULT_TERRITORIES {
            let quote = pipeline.price(Some(*territory), base()).await;
            assert_eq!(quote, PricingQuote::safe_default(base()));
        }
        assert_eq!(pipeline.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_rate_failures_fall_back_to_base_price() {
        for mode in [RateMode::Unavailable, RateMode::Malformed] {
            let pipeline = pipeline(mode);
            for (territory, _) in DEFAULT_TERRITORIES {
                let quote = pipeline.price(Some(*territory), base()).await;
                assert_eq!(quote.amount(), dec!(2.50));
                assert_eq!(quote.currency(), CurrencyCode::USD);
            }
        }
    }

    #[tokio::test]
    async fn test_base_currency_locales_never_call_provider() {
        let pipeline = pipeline(RateMode::Rate(2500.0));
        for signal in ["ZZ", "US", "USD", "tz"] {
            let quote = pipeline.price(Some(signal), base()).await;
            assert_eq!(quote, PricingQuote::safe_default(base()));
        }
        assert_eq!(pipeline.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_absent_locale_uses_default_territory() {
        let pipeline = pipeline(RateMode::Rate(129.0));
        let quote = pipeline.price(None, base()).await;
        assert_eq!(quote.currency(), CurrencyCode::KES);
        assert_eq!(quote.amount(), dec!(400));
        assert_eq!(pipeline.provider().calls(), 1);
    }

    #[tokio::test]
    async fn test_pricing_is_idempotent() {
        let pipeline = pipeline(RateMode::Rate(2512.7));
        let first = pipeline.price(Some("TZ"), base()).await;
        let second = pipeline.price(Some("TZ"), base()).await;
        assert_eq!(first, second);
        assert_eq!(pipeline.provider().calls(), 2);
    }

    #[tokio::test]
    async fn test_tanzania_quote_rounds_to_hundreds() {
        let pipeline = pipeline(RateMode::Rate(2500.0));
        let quote = pipeline.price(Some("TZ"), base()).await;
        assert_eq!(quote.amount(), dec!(6300));
        assert_eq!(quote.currency(), CurrencyCode::TZS);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Checkout service
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_pay_tanzania_end_to_end() {
        let service = service(
            RateMode::Rate(2500.0),
            GatewayMode::Link("https://pay.example/abc".into()),
            IdentityPolicy::Lenient,
        );

        let link = service
            .pay(intent(Some("0712345678"), Some("TZ")))
            .await
            .unwrap();
        assert_eq!(link, "https://pay.example/abc");

        let payload = service.gateway().last_payload().unwrap();
        assert_eq!(payload.amount, dec!(6300));
        assert_eq!(payload.currency, CurrencyCode::TZS);
        assert_eq!(payload.buyer_email, "0712345678@zenopay.com");
        assert_eq!(
            payload.redirect_url,
            "https://shop.example.com/uthibitisho.html"
        );
    }

    #[tokio::test]
    async fn test_pay_unmapped_locale_uses_base_price() {
        let service = service(
            RateMode::Rate(2500.0),
            GatewayMode::Link("https://pay.example/abc".into()),
            IdentityPolicy::Lenient,
        );

        service.pay(intent(None, Some("ZZ"))).await.unwrap();

        let payload = service.gateway().last_payload().unwrap();
        assert_eq!(payload.amount, dec!(2.50));
        assert_eq!(payload.currency, CurrencyCode::USD);
        assert_eq!(payload.buyer_name, "Customer");
        assert_eq!(payload.buyer_phone, "N/A");
        assert!(payload.buyer_email.starts_with("customer-"));
        assert_eq!(service.pricing().provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_pay_without_link_is_no_payment_link() {
        let service = service(
            RateMode::Rate(2500.0),
            GatewayMode::Empty,
            IdentityPolicy::Lenient,
        );

        let result = service.pay(intent(Some("0712345678"), Some("TZ"))).await;
        assert!(matches!(result, Err(AppError::NoPaymentLink)));
    }

    #[tokio::test]
    async fn test_pay_gateway_down_is_upstream_error() {
        let service = service(
            RateMode::Rate(2500.0),
            GatewayMode::Down,
            IdentityPolicy::Lenient,
        );

        let result = service.pay(intent(Some("0712345678"), Some("TZ"))).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_before_any_remote_call() {
        let service = service(
            RateMode::Rate(2500.0),
            GatewayMode::Link("https://pay.example/abc".into()),
            IdentityPolicy::strict(),
        );

        let result = service.pay(intent(Some("12345"), Some("TZ"))).await;
        assert!(matches!(result, Err(AppError::InvalidIdentity)));

        let result = service.pay(intent(None, Some("TZ"))).await;
        assert!(matches!(result, Err(AppError::InvalidIdentity)));

        assert_eq!(service.pricing().provider().calls(), 0);
        assert_eq!(service.gateway().calls(), 0);
    }

    #[tokio::test]
    async fn test_strict_policy_accepts_valid_phone() {
        let service = service(
            RateMode::Rate(2500.0),
            GatewayMode::Link("https://pay.example/abc".into()),
            IdentityPolicy::strict(),
        );

        let link = service
            .pay(intent(Some("0612345678"), Some("TZ")))
            .await
            .unwrap();
        assert_eq!(link, "https://pay.example/abc");
    }

    #[tokio::test]
    async fn test_quote_uses_configured_base_price() {
        let service = service(
            RateMode::Unavailable,
            GatewayMode::Empty,
            IdentityPolicy::Lenient,
        );

        let quote = service.quote(Some("KE")).await;
        assert_eq!(quote, PricingQuote::safe_default(base()));
    }
}
