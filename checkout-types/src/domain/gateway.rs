//! Gateway responses and their translation into the service contract.

use crate::ports::GatewayError;

/// What the gateway's checkout endpoint answered with on a 2xx status.
///
/// `payment_link` is `None` whenever the body held no string link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayResponse {
    pub payment_link: Option<String>,
}

/// Why a checkout could not produce a payment link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayFailure {
    /// The gateway answered but returned no usable link.
    NoLink,
    /// The call itself failed (transport, timeout, non-2xx, undecodable body).
    GatewayError,
}

impl GatewayFailure {
    pub fn reason(&self) -> &'static str {
        match self {
            GatewayFailure::NoLink => "no link",
            GatewayFailure::GatewayError => "gateway error",
        }
    }
}

/// Outcome of a single gateway checkout call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayResult {
    Success { payment_link: String },
    Failure(GatewayFailure),
}

impl GatewayResult {
    /// Maps a raw gateway outcome into the service's own result.
    pub fn translate(outcome: Result<GatewayResponse, GatewayError>) -> Self {
        match outcome {
            Ok(response) => match response.payment_link {
                Some(link) if !link.trim().is_empty() => GatewayResult::Success {
                    payment_link: link,
                },
                _ => GatewayResult::Failure(GatewayFailure::NoLink),
            },
            Err(_) => GatewayResult::Failure(GatewayFailure::GatewayError),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GatewayResult::Success { .. })
    }
}
