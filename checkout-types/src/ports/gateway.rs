//! Payment gateway port.

use crate::domain::{CheckoutPayload, GatewayResponse};

/// Failure of the gateway call itself.
///
/// The text is for logs only; it never reaches the payer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway unreachable: {0}")]
    Transport(String),

    #[error("Gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Gateway response could not be decoded: {0}")]
    Decode(String),
}

/// Port trait for the hosted-checkout payment gateway.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Submits a checkout request and returns the gateway's raw answer.
    async fn create_checkout(
        &self,
        payload: &CheckoutPayload,
    ) -> Result<GatewayResponse, GatewayError>;
}
