//! The caller's shopping cart.

use edumall_core::schema::cart::{Cart, CartDetail, UpdateCartItemQuantity};
use edumall_core::{CartDetailId, DataResponse, MessageResponse};
use tracing::instrument;
use validator::Validate;

use crate::error::ApiError;
use crate::http::{Endpoint, HttpClient};

#[must_use]
pub fn fetch_cart_endpoint(token: Option<&str>) -> Endpoint {
    Endpoint::get("mobile/cart").bearer(token)
}

/// Current cart with its line items.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip_all)]
pub async fn fetch_cart(
    http: &HttpClient,
    token: Option<&str>,
) -> Result<DataResponse<Cart>, ApiError> {
    http.send(fetch_cart_endpoint(token)).await
}

/// `PUT carts`.
///
/// # Errors
///
/// Returns an error if the body fails its field rules.
pub fn update_cart_item_quantity_endpoint(
    body: &UpdateCartItemQuantity,
    token: Option<&str>,
) -> Result<Endpoint, ApiError> {
    body.validate()?;
    Endpoint::put("carts").bearer(token).json(body)
}

/// Set the quantity of one line item.
///
/// # Errors
///
/// Returns an error if the request is invalid, the server rejects it or the
/// response does not match its schema.
#[instrument(skip(http, body, token), fields(cart_detail_id = %body.cart_detail_id, quantity = body.quantity))]
pub async fn update_cart_item_quantity(
    http: &HttpClient,
    body: &UpdateCartItemQuantity,
    token: Option<&str>,
) -> Result<DataResponse<CartDetail>, ApiError> {
    http.send(update_cart_item_quantity_endpoint(body, token)?)
        .await
}

#[must_use]
pub fn delete_cart_item_endpoint(id: &CartDetailId, token: Option<&str>) -> Endpoint {
    Endpoint::delete("carts").segment(id).bearer(token)
}

/// Remove one line item.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http, token))]
pub async fn delete_cart_item(
    http: &HttpClient,
    id: &CartDetailId,
    token: Option<&str>,
) -> Result<MessageResponse, ApiError> {
    http.send(delete_cart_item_endpoint(id, token)).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::test_support::{json_body, url};
    use crate::http::HttpMethod;

    #[test]
    fn test_fetch_cart_endpoint() {
        let endpoint = fetch_cart_endpoint(Some("tok"));
        assert_eq!(endpoint.method, HttpMethod::Get);
        assert_eq!(url(&endpoint), "https://api.edumall.vn/api/mobile/cart");
        assert!(endpoint.bearer.is_some());
    }

    #[test]
    fn test_update_quantity_body() {
        let endpoint = update_cart_item_quantity_endpoint(
            &UpdateCartItemQuantity {
                cart_detail_id: CartDetailId::new("abc"),
                quantity: 2,
            },
            Some("tok"),
        )
        .unwrap();
        assert_eq!(endpoint.method, HttpMethod::Put);
        assert_eq!(url(&endpoint), "https://api.edumall.vn/api/carts");
        assert_eq!(
            json_body(&endpoint),
            serde_json::json!({"cartDetailId": "abc", "quantity": 2})
        );
    }

    #[test]
    fn test_update_quantity_rejects_zero() {
        let err = update_cart_item_quantity_endpoint(
            &UpdateCartItemQuantity {
                cart_detail_id: CartDetailId::new("abc"),
                quantity: 0,
            },
            Some("tok"),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_delete_cart_item_encodes_id() {
        let endpoint = delete_cart_item_endpoint(&CartDetailId::new("a/b"), None);
        assert_eq!(endpoint.method, HttpMethod::Delete);
        assert_eq!(url(&endpoint), "https://api.edumall.vn/api/carts/a%2Fb");
        assert!(endpoint.bearer.is_none());
    }
}
