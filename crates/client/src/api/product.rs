//! Physical products and their reviews.

use edumall_core::schema::product::{Product, ProductReview};
use edumall_core::{DataResponse, ProductId};
use tracing::instrument;

use crate::error::ApiError;
use crate::http::{Endpoint, HttpClient};

#[must_use]
pub fn fetch_products_endpoint(token: Option<&str>) -> Endpoint {
    Endpoint::get("products").bearer(token)
}

/// Full product catalog.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip_all)]
pub async fn fetch_products(
    http: &HttpClient,
    token: Option<&str>,
) -> Result<DataResponse<Vec<Product>>, ApiError> {
    http.send(fetch_products_endpoint(token)).await
}

/// `GET products/{id}/reviews`.
#[must_use]
pub fn fetch_product_reviews_endpoint(id: &ProductId, token: Option<&str>) -> Endpoint {
    Endpoint::get("products")
        .segment(id)
        .segment("reviews")
        .bearer(token)
}

/// Reviews left on one product.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http, token))]
pub async fn fetch_product_reviews(
    http: &HttpClient,
    id: &ProductId,
    token: Option<&str>,
) -> Result<DataResponse<Vec<ProductReview>>, ApiError> {
    http.send(fetch_product_reviews_endpoint(id, token)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::url;

    #[test]
    fn test_fetch_product_reviews_path() {
        let endpoint = fetch_product_reviews_endpoint(&ProductId::new("p1"), Some("tok"));
        assert_eq!(url(&endpoint), "https://api.edumall.vn/api/products/p1/reviews");
    }

    #[test]
    fn test_fetch_products_without_token() {
        let endpoint = fetch_products_endpoint(None);
        assert_eq!(url(&endpoint), "https://api.edumall.vn/api/products");
        assert!(endpoint.bearer.is_none());
    }
}
