//! Payload sent to the payment gateway's checkout endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use exchange_rates::CurrencyCode;

/// Gateway checkout request.
///
/// Every field is statically enumerated; `amount` is serialized as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckoutPayload {
    #[schema(value_type = f64, example = 6300)]
    pub amount: Decimal,
    pub currency: CurrencyCode,
    #[schema(example = "0712345678")]
    pub buyer_name: String,
    #[schema(example = "0712345678@zenopay.com")]
    pub buyer_email: String,
    #[schema(example = "0712345678")]
    pub buyer_phone: String,
    #[schema(example = "https://shop.example.com/uthibitisho.html")]
    pub redirect_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payload_wire_shape() {
        let payload = CheckoutPayload {
            amount: dec!(6300),
            currency: CurrencyCode::TZS,
            buyer_name: "0712345678".into(),
            buyer_email: "0712345678@zenopay.com".into(),
            buyer_phone: "0712345678".into(),
            redirect_url: "https://shop.example.com/uthibitisho.html".into(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["amount"].is_number());
        assert_eq!(json["currency"], "TZS");
        assert_eq!(json["buyer_email"], "0712345678@zenopay.com");
        assert_eq!(json.as_object().unwrap().len(), 6);
    }
}
