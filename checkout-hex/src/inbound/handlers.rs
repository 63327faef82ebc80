//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use checkout_types::{
    AppError, ErrorResponse, ExchangeRateProvider, PayRequest, PayResponse, PaymentGateway,
    QuoteResponse,
};

use crate::checkout::RequestOrigin;
use crate::service::{CheckoutService, PaymentIntent};

/// Application state shared across handlers.
pub struct AppState<P: ExchangeRateProvider, G: PaymentGateway> {
    pub service: CheckoutService<P, G>,
}

impl<P: ExchangeRateProvider, G: PaymentGateway> AppState<P, G> {
    /// Reads the locale signal from the configured edge header.
    fn locale(&self, headers: &HeaderMap) -> Option<String> {
        header_str(headers, &self.service.settings().locale_header).map(String::from)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::InvalidIdentity | AppError::BadRequest(_) | AppError::NoPaymentLink => {
                StatusCode::BAD_REQUEST
            }
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            warn!(error = %self.0, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.0.client_message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// `POST /pay` body, accepted as JSON or as an urlencoded form.
pub struct PayBody(pub PayRequest);

impl<S: Send + Sync> FromRequest<S> for PayBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(body) = Json::<PayRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(PayBody(body))
        } else {
            let Form(body) = Form::<PayRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(PayBody(body))
        }
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Quote the base price for the caller's locale.
#[tracing::instrument(skip(state, headers))]
pub async fn quote<P: ExchangeRateProvider, G: PaymentGateway>(
    State(state): State<Arc<AppState<P, G>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let locale = state.locale(&headers);
    let quote = state.service.quote(locale.as_deref()).await;
    Json(QuoteResponse::from(quote))
}

/// Origin the payer reached us on.
///
/// Forwarded scheme and host are only read when the deployment trusts its proxy;
/// otherwise the request's own `Host` is used over plain `http`.
fn request_origin(
    headers: &HeaderMap,
    uri: &Uri,
    trust_proxy: bool,
) -> Result<RequestOrigin, AppError> {
    let forwarded = |name: &str| {
        if trust_proxy {
            header_str(headers, name)
        } else {
            None
        }
    };

    let host = forwarded("x-forwarded-host")
        .or_else(|| header_str(headers, header::HOST.as_str()))
        .or_else(|| uri.authority().map(|a| a.as_str()));

    RequestOrigin::new(forwarded("x-forwarded-proto"), host)
}

/// Start a checkout and return the gateway's payment link.
#[tracing::instrument(skip(state, headers, uri, body))]
pub async fn pay<P: ExchangeRateProvider, G: PaymentGateway>(
    State(state): State<Arc<AppState<P, G>>>,
    headers: HeaderMap,
    uri: Uri,
    PayBody(body): PayBody,
) -> Result<impl IntoResponse, ApiError> {
    let origin = request_origin(&headers, &uri, state.service.settings().trust_proxy)?;

    let intent = PaymentIntent {
        phone: body.phone,
        locale: state.locale(&headers),
        origin,
    };

    let payment_link = state.service.pay(intent).await?;
    Ok(Json(PayResponse { payment_link }))
}
