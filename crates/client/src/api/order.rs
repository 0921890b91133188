//! Checkout.

use edumall_core::DataResponse;
use edumall_core::schema::order::{CreateOrder, Order};
use tracing::instrument;
use validator::Validate;

use crate::error::ApiError;
use crate::http::{Endpoint, HttpClient};

/// `POST orders`.
///
/// # Errors
///
/// Returns an error if the body fails its field rules.
pub fn create_order_endpoint(body: &CreateOrder, token: Option<&str>) -> Result<Endpoint, ApiError> {
    body.validate()?;
    Endpoint::post("orders").bearer(token).json(body)
}

/// Place an order for the given cart lines.
///
/// # Errors
///
/// Returns an error if the request is invalid, the server rejects it or the
/// response does not match its schema.
#[instrument(
    skip(http, body, token),
    fields(lines = body.array_cart_detail_ids.len(), delivery_info_id = %body.delivery_info_id)
)]
pub async fn create_order(
    http: &HttpClient,
    body: &CreateOrder,
    token: Option<&str>,
) -> Result<DataResponse<Order>, ApiError> {
    http.send(create_order_endpoint(body, token)?).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use edumall_core::{CartDetailId, DeliveryInfoId, DeliveryMethod};

    use super::*;
    use crate::api::test_support::{json_body, url};

    #[test]
    fn test_create_order_body() {
        let endpoint = create_order_endpoint(
            &CreateOrder {
                array_cart_detail_ids: vec![CartDetailId::new("cd1"), CartDetailId::new("cd2")],
                delivery_info_id: DeliveryInfoId::new("d1"),
                deli_method: DeliveryMethod::Express,
            },
            Some("tok"),
        )
        .unwrap();
        assert_eq!(url(&endpoint), "https://api.edumall.vn/api/orders");
        assert_eq!(
            json_body(&endpoint),
            serde_json::json!({
                "arrayCartDetailIds": ["cd1", "cd2"],
                "deliveryInfoId": "d1",
                "deliMethod": "EXPRESS"
            })
        );
    }

    #[test]
    fn test_create_order_requires_lines() {
        let err = create_order_endpoint(
            &CreateOrder {
                array_cart_detail_ids: Vec::new(),
                delivery_info_id: DeliveryInfoId::new("d1"),
                deli_method: DeliveryMethod::Standard,
            },
            Some("tok"),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
