//! Rate limiting middleware using Governor.
//!
//! Implements per-client rate limiting with a keyed token bucket.
//! Clients are identified by their peer address, or by the hop a trusted
//! proxy appended to `X-Forwarded-For`.

use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{Quota, RateLimiter, clock::DefaultClock, state::keyed::DefaultKeyedStateStore};
use serde_json::json;
use std::{
    net::{IpAddr, SocketAddr},
    num::NonZeroU32,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// Requests per minute allowed for each client when none is configured.
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 100;

/// Idle client buckets are dropped after this many checks.
const RETAIN_EVERY: u64 = 1024;

/// Key shared by every request whose client cannot be identified.
const ANONYMOUS: &str = "anonymous";

type KeyedLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    limiter: KeyedLimiter,
    checks: AtomicU64,
    trust_proxy: bool,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::per_minute(DEFAULT_REQUESTS_PER_MINUTE)
    }
}

impl RateLimiterState {
    /// Creates a limiter allowing `requests` per minute per client, with an
    /// equal burst. Zero is treated as one.
    pub fn per_minute(requests: u32) -> Self {
        let requests = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(requests)),
            checks: AtomicU64::new(0),
            trust_proxy: false,
        }
    }

    /// Identify clients by `X-Forwarded-For` / `X-Real-IP` instead of the peer address.
    pub fn trusting_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, key: &str) -> bool {
        let allowed = self.limiter.check_key(&key.to_string()).is_ok();

        if self.checks.fetch_add(1, Ordering::Relaxed) % RETAIN_EVERY == RETAIN_EVERY - 1 {
            self.limiter.retain_recent();
            self.limiter.shrink_to_fit();
        }

        allowed
    }

    /// Number of client buckets currently held.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Key identifying the client behind a request.
    fn client_key(&self, headers: &HeaderMap, peer: Option<IpAddr>) -> String {
        let forwarded = if self.trust_proxy {
            forwarded_client(headers)
        } else {
            None
        };

        forwarded
            .or_else(|| peer.map(|ip| ip.to_string()))
            .unwrap_or_else(|| ANONYMOUS.to_string())
    }
}

/// Last `X-Forwarded-For` hop (the one our proxy appended), then `X-Real-IP`.
fn forwarded_client(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| headers.get(name).and_then(|h| h.to_str().ok());

    header("x-forwarded-for")
        .and_then(|s| s.rsplit(',').map(str::trim).find(|s| !s.is_empty()))
        .or_else(|| header("x-real-ip").map(str::trim).filter(|s| !s.is_empty()))
        .map(String::from)
}

/// Rate limiting middleware.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Skip rate limiting for health endpoint
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let key = limiter.client_key(request.headers(), peer);

    if !limiter.check(&key) {
        tracing::warn!(client = %key, "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Maombi ni mengi mno. Tafadhali jaribu tena baadae.",
                "retry_after_seconds": 60
            })),
        )
            .into_response();
    }

    next.run(request).await
}
