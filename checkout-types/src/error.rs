//! Error types for the checkout service.

use rust_decimal::Decimal;

use crate::domain::GatewayFailure;

/// Fixed, localized messages shown to payers.
///
/// Technical detail is logged, never placed in these.
pub mod messages {
    pub const NO_PAYMENT_LINK: &str =
        "Ombi la Malipo Halikufanikiwa. Hatukuweza kupata linki ya malipo.";
    pub const SYSTEM_FAILURE: &str =
        "Samahani, kumetokea tatizo la kimfumo. Tafadhali jaribu tena baadae.";
    pub const INVALID_PHONE: &str =
        "Namba ya simu si sahihi. Tafadhali weka namba sahihi na ujaribu tena.";
    pub const INVALID_REQUEST: &str = "Ombi si sahihi. Tafadhali jaribu tena.";
}

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Payer identity is missing or malformed")]
    InvalidIdentity,

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid payer identity")]
    InvalidIdentity,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Gateway returned no payment link")]
    NoPaymentLink,

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The message a payer sees for this error.
    pub fn client_message(&self) -> &'static str {
        match self {
            AppError::InvalidIdentity => messages::INVALID_PHONE,
            AppError::BadRequest(_) => messages::INVALID_REQUEST,
            AppError::NoPaymentLink => messages::NO_PAYMENT_LINK,
            AppError::Upstream(_) | AppError::Internal(_) => messages::SYSTEM_FAILURE,
        }
    }

    /// True when the payer sent something unusable (HTTP 400-equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidIdentity | AppError::BadRequest(_) | AppError::NoPaymentLink
        )
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidIdentity => AppError::InvalidIdentity,
            DomainError::NonPositiveAmount(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<GatewayFailure> for AppError {
    fn from(failure: GatewayFailure) -> Self {
        match failure {
            GatewayFailure::NoLink => AppError::NoPaymentLink,
            GatewayFailure::GatewayError => AppError::Upstream(failure.reason().into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_failures_map_to_fixed_messages() {
        let no_link: AppError = GatewayFailure::NoLink.into();
        assert!(no_link.is_client_error());
        assert_eq!(no_link.client_message(), messages::NO_PAYMENT_LINK);

        let upstream: AppError = GatewayFailure::GatewayError.into();
        assert!(!upstream.is_client_error());
        assert_eq!(upstream.client_message(), messages::SYSTEM_FAILURE);
    }

    #[test]
    fn test_client_message_never_carries_detail() {
        let err = AppError::Internal("postgres://user:secret@db".into());
        assert!(!err.client_message().contains("secret"));
        let err = AppError::BadRequest("missing host header".into());
        assert_eq!(err.client_message(), messages::INVALID_REQUEST);
    }

    #[test]
    fn test_invalid_identity_is_client_error() {
        let err: AppError = DomainError::InvalidIdentity.into();
        assert!(matches!(err, AppError::InvalidIdentity));
        assert!(err.is_client_error());
    }
}
