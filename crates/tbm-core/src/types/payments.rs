use serde::{Deserialize, Serialize};

use super::chat::User;
use crate::{
    decode::wire_record,
    ids::{PaymentChargeId, PreCheckoutQueryId, ShippingQueryId},
};

/// A price portion, in the smallest units of the currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPrice {
    pub label: String,
    pub amount: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub country_code: String,
    pub state: String,
    pub city: String,
    pub street_line1: String,
    pub street_line2: String,
    pub post_code: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuery {
    pub id: ShippingQueryId,
    pub from: User,
    pub invoice_payload: String,
    pub shipping_address: ShippingAddress,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreCheckoutQuery {
    pub id: PreCheckoutQueryId,
    pub from: User,
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_option_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_info: Option<OrderInfo>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuccessfulPayment {
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_option_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_info: Option<OrderInfo>,
    pub telegram_payment_charge_id: PaymentChargeId,
    pub provider_payment_charge_id: PaymentChargeId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaidMediaPurchased {
    pub from: User,
    pub paid_media_payload: String,
}

wire_record!(ShippingQuery, PreCheckoutQuery, SuccessfulPayment, PaidMediaPurchased);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decode::{DecodeError, FromWire};

    #[test]
    fn pre_checkout_keeps_charge_ids_distinct_from_query_id() {
        let q = PreCheckoutQuery::from_wire(json!({
            "id": "pcq-1",
            "from": {"id": 1, "is_bot": false, "first_name": "A"},
            "currency": "EUR",
            "total_amount": 1250,
            "invoice_payload": "order-9",
            "order_info": {"email": "a@example.com"}
        }))
        .unwrap();
        assert_eq!(q.id.as_str(), "pcq-1");
        assert_eq!(q.order_info.unwrap().email.as_deref(), Some("a@example.com"));
    }

    #[test]
    fn shipping_query_without_address_is_malformed() {
        let err = ShippingQuery::from_wire(json!({
            "id": "s1",
            "from": {"id": 1, "is_bot": false, "first_name": "A"},
            "invoice_payload": "p"
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Malformed { variant: "ShippingQuery", field: Some(ref f), .. } if f == "shipping_address"
        ));
    }
}
