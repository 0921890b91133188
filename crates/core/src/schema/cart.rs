//! Shopping cart and its line items.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{CartDetailId, CartId, ComboId, CourseId, ProductId, Vnd};

/// The requesting user's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub total_quantity: u32,
    pub total_price: Vnd,
    pub cart_details: Vec<CartDetail>,
}

impl Cart {
    /// Line items that reference a physical product and therefore need shipping.
    pub fn shippable(&self) -> impl Iterator<Item = &CartDetail> {
        self.cart_details.iter().filter(|d| d.product_id.is_some())
    }
}

/// One line item. Exactly one of the product, course or combo references is
/// expected to be set by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDetail {
    pub id: CartDetailId,
    pub product_id: Option<ProductId>,
    pub course_id: Option<CourseId>,
    pub combo_id: Option<ComboId>,
    pub name: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub unit_price: Vnd,
    pub total_price: Vnd,
}

impl CartDetail {
    /// What this line item points at.
    #[must_use]
    pub fn item(&self) -> Option<CartItemRef<'_>> {
        self.product_id
            .as_ref()
            .map(CartItemRef::Product)
            .or_else(|| self.course_id.as_ref().map(CartItemRef::Course))
            .or_else(|| self.combo_id.as_ref().map(CartItemRef::Combo))
    }
}

/// Borrowed reference to the purchasable behind a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartItemRef<'a> {
    Product(&'a ProductId),
    Course(&'a CourseId),
    Combo(&'a ComboId),
}

/// Body of `PUT carts`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCartItemQuantity {
    pub cart_detail_id: CartDetailId,
    #[validate(range(min = 1, max = 99, message = "Quantity must be between 1 and 99"))]
    pub quantity: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::{DataResponse, parse, parse_value};

    fn cart_json() -> serde_json::Value {
        serde_json::json!({
            "id": "c1",
            "totalQuantity": 3,
            "totalPrice": 648000,
            "cartDetails": [
                {
                    "id": "abc",
                    "productId": "p1",
                    "courseId": null,
                    "comboId": null,
                    "name": "Sổ tay lập trình",
                    "image": "https://cdn.edumall.vn/p1.png",
                    "quantity": 2,
                    "unitPrice": 75000,
                    "totalPrice": 150000
                },
                {
                    "id": "def",
                    "productId": null,
                    "courseId": "k1",
                    "comboId": null,
                    "name": "Khóa học Rust",
                    "image": null,
                    "quantity": 1,
                    "unitPrice": 498000,
                    "totalPrice": 498000
                }
            ]
        })
    }

    #[test]
    fn test_cart_round_trips_declared_fields() {
        let value = cart_json();
        let cart: Cart = parse_value(value.clone()).unwrap();
        assert_eq!(cart.cart_details.len(), 2);
        assert_eq!(serde_json::to_value(&cart).unwrap(), value);
    }

    #[test]
    fn test_item_reference() {
        let cart: Cart = parse_value(cart_json()).unwrap();
        let first = cart.cart_details.first().unwrap();
        assert!(matches!(first.item(), Some(CartItemRef::Product(id)) if id.as_str() == "p1"));
        let second = cart.cart_details.get(1).unwrap();
        assert!(matches!(second.item(), Some(CartItemRef::Course(_))));
        assert_eq!(cart.shippable().count(), 1);
    }

    #[test]
    fn test_string_price_is_rejected() {
        let mut value = cart_json();
        value["cartDetails"][0]["unitPrice"] = serde_json::json!("75000");
        let body = serde_json::json!({"data": value}).to_string();
        let err = parse::<DataResponse<Cart>>(&body).unwrap_err();
        assert_eq!(err.path, "data.cartDetails[0].unitPrice");
    }

    #[test]
    fn test_update_quantity_body() {
        let req = UpdateCartItemQuantity {
            cart_detail_id: CartDetailId::new("abc"),
            quantity: 2,
        };
        assert!(req.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"cartDetailId": "abc", "quantity": 2})
        );
    }

    #[test]
    fn test_update_quantity_rejects_zero() {
        let req = UpdateCartItemQuantity {
            cart_detail_id: CartDetailId::new("abc"),
            quantity: 0,
        };
        assert!(req.validate().is_err());
    }
}
