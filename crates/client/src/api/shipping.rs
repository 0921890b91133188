//! Saved delivery addresses ("delivery infos" on the wire).

use edumall_core::schema::shipping::{CreateShippingInfo, ShippingAddress};
use edumall_core::{DataResponse, DeliveryInfoId, MessageResponse};
use tracing::instrument;
use validator::Validate;

use crate::error::ApiError;
use crate::http::{Endpoint, HttpClient};

#[must_use]
pub fn fetch_shipping_infos_endpoint(token: Option<&str>) -> Endpoint {
    Endpoint::get("delivery-infos").bearer(token)
}

/// Every address the caller has saved.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip_all)]
pub async fn fetch_shipping_infos(
    http: &HttpClient,
    token: Option<&str>,
) -> Result<DataResponse<Vec<ShippingAddress>>, ApiError> {
    http.send(fetch_shipping_infos_endpoint(token)).await
}

/// `POST delivery-infos`.
///
/// # Errors
///
/// Returns an error if the body fails its field rules.
pub fn create_shipping_info_endpoint(
    body: &CreateShippingInfo,
    token: Option<&str>,
) -> Result<Endpoint, ApiError> {
    body.validate()?;
    Endpoint::post("delivery-infos").bearer(token).json(body)
}

/// Save a new address.
///
/// # Errors
///
/// Returns an error if the request is invalid, the server rejects it or the
/// response does not match its schema.
#[instrument(skip(http, body, token), fields(tag = %body.tag))]
pub async fn create_shipping_info(
    http: &HttpClient,
    body: &CreateShippingInfo,
    token: Option<&str>,
) -> Result<DataResponse<ShippingAddress>, ApiError> {
    http.send(create_shipping_info_endpoint(body, token)?).await
}

#[must_use]
pub fn delete_shipping_info_endpoint(id: &DeliveryInfoId, token: Option<&str>) -> Endpoint {
    Endpoint::delete("delivery-infos").segment(id).bearer(token)
}

/// Forget a saved address.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http, token))]
pub async fn delete_shipping_info(
    http: &HttpClient,
    id: &DeliveryInfoId,
    token: Option<&str>,
) -> Result<MessageResponse, ApiError> {
    http.send(delete_shipping_info_endpoint(id, token)).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::test_support::{json_body, url};
    use crate::http::HttpMethod;

    fn home() -> CreateShippingInfo {
        CreateShippingInfo {
            name: "Nguyễn Văn An".to_string(),
            phone: "0901234567".to_string(),
            address: "12 Lý Thường Kiệt, Hà Nội".to_string(),
            tag: "Nhà".to_string(),
        }
    }

    #[test]
    fn test_create_shipping_info_body() {
        let endpoint = create_shipping_info_endpoint(&home(), Some("tok")).unwrap();
        assert_eq!(endpoint.method, HttpMethod::Post);
        assert_eq!(url(&endpoint), "https://api.edumall.vn/api/delivery-infos");
        assert_eq!(json_body(&endpoint)["phone"], "0901234567");
    }

    #[test]
    fn test_create_shipping_info_rejects_bad_phone() {
        let body = CreateShippingInfo {
            phone: "call me".to_string(),
            ..home()
        };
        assert!(matches!(
            create_shipping_info_endpoint(&body, Some("tok")),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_delete_shipping_info_path() {
        let endpoint = delete_shipping_info_endpoint(&DeliveryInfoId::new("d1"), Some("tok"));
        assert_eq!(endpoint.method, HttpMethod::Delete);
        assert_eq!(url(&endpoint), "https://api.edumall.vn/api/delivery-infos/d1");
    }
}
