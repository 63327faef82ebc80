//! HTTP Server configuration and startup.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use checkout_types::{ExchangeRateProvider, PaymentGateway};

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::CheckoutService;
use crate::openapi::ApiDoc;

/// HTTP Server for the Checkout API.
pub struct HttpServer<P: ExchangeRateProvider, G: PaymentGateway> {
    state: Arc<AppState<P, G>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<P: ExchangeRateProvider, G: PaymentGateway> HttpServer<P, G> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: CheckoutService<P, G>) -> Self {
        let trust_proxy = service.settings().trust_proxy;
        Self {
            state: Arc::new(AppState { service }),
            // 100 req/min default
            rate_limiter: Arc::new(RateLimiterState::default().trusting_proxy(trust_proxy)),
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(service: CheckoutService<P, G>, requests_per_minute: u32) -> Self {
        let rate_limiter = RateLimiterState::per_minute(requests_per_minute)
            .trusting_proxy(service.settings().trust_proxy);
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(rate_limiter),
        }
    }

    pub fn rate_limiter(&self) -> &Arc<RateLimiterState> {
        &self.rate_limiter
    }

    pub fn state(&self) -> &Arc<AppState<P, G>> {
        &self.state
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route("/pay", post(handlers::pay::<P, G>))
            .route("/api/quote", get(handlers::quote::<P, G>))
            .layer(metrics)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router().into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
