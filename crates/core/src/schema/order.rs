//! Order placement.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{CartDetailId, DeliveryInfoId, DeliveryMethod, OrderId, OrderStatus, Vnd};

/// A placed order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total_price: Vnd,
    pub shipping_fee: Vnd,
    pub deli_method: DeliveryMethod,
    pub created_at: String,
}

/// Body of `POST orders`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateOrder {
    #[validate(length(min = 1, message = "At least one cart item is required"))]
    pub array_cart_detail_ids: Vec<CartDetailId>,
    pub delivery_info_id: DeliveryInfoId,
    pub deli_method: DeliveryMethod,
}
