//! # Checkout Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the outbound adapters (exchange rates, payment gateway)
//! - Create the checkout service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_hex::{CheckoutService, CheckoutSettings, inbound::HttpServer};
use checkout_remote::{ExchangeRateApiClient, ZenoPayClient, build_http_client};
use checkout_types::LocaleResolver;

use config::Config;

fn init_tracer(
    endpoint: &str,
) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("checkout-service"), provider))
}

fn resolver(config: &Config) -> LocaleResolver {
    config
        .territory_overrides
        .iter()
        .fold(LocaleResolver::default(), |resolver, (territory, currency)| {
            resolver.with_territory(territory.clone(), *currency)
        })
        .with_default_territory(config.default_territory.clone())
}

fn settings(config: &Config) -> CheckoutSettings {
    let mut settings = CheckoutSettings::new(config.base_price)
        .with_identity_policy(config.identity_policy.clone());
    settings.confirmation_path = config.confirmation_path.clone();
    settings.email_domain = config.email_domain.clone();
    settings.locale_header = config.locale_header.clone();
    settings.trust_proxy = config.trust_proxy;
    settings
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration before logging so the OTLP endpoint is known
    let config = Config::from_env()?;

    let otel = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => Some(init_tracer(endpoint)?),
        None => None,
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,checkout_app=debug,checkout_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting checkout server on port {}", config.port);
    tracing::info!(
        base_price = %config.base_price.amount(),
        identity_policy = config.identity_policy.name(),
        default_territory = ?config.default_territory,
        "Checkout configured"
    );
    if config.rate_api_key.is_none() {
        tracing::warn!("EXCHANGE_RATE_API_KEY not set, all checkouts will be priced in USD");
    }

    let http = build_http_client(config.outbound_timeout)?;
    let rates = ExchangeRateApiClient::new(
        http.clone(),
        config.rate_api_url.clone(),
        config.rate_api_key.clone(),
    );
    let gateway = ZenoPayClient::new(http, &config.gateway_url, config.gateway_api_key.clone());

    // Create the checkout service
    let service = CheckoutService::new(rates, gateway, resolver(&config), settings(&config));

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(service, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}
