//! Products and reviews.

use std::sync::Arc;

use edumall_core::schema::product::{Product, ProductReview};
use edumall_core::{DataResponse, ProductId};
use tracing::instrument;

use super::Token;
use crate::api::product;
use crate::error::QueryResult;
use crate::query::{QueryKey, Resource};
use crate::state::AppState;

#[must_use]
pub const fn products_key() -> QueryKey {
    QueryKey::new(Resource::Products)
}

#[must_use]
pub fn product_reviews_key(id: &ProductId) -> QueryKey {
    QueryKey::new(Resource::ProductReviews).with("id", id.as_str())
}

/// # Errors
///
/// Returns an error if the request fails or the response is malformed.
#[instrument(skip_all)]
pub async fn use_products(state: &AppState) -> QueryResult<Arc<DataResponse<Vec<Product>>>> {
    let token = Token::current(state);
    state
        .queries()
        .fetch(products_key(), || {
            product::fetch_products(state.http(), token.as_deref())
        })
        .await
}

/// # Errors
///
/// Returns an error if the request fails or the response is malformed.
#[instrument(skip(state))]
pub async fn use_product_reviews(
    state: &AppState,
    id: &ProductId,
) -> QueryResult<Arc<DataResponse<Vec<ProductReview>>>> {
    let token = Token::current(state);
    state
        .queries()
        .fetch(product_reviews_key(id), || {
            product::fetch_product_reviews(state.http(), id, token.as_deref())
        })
        .await
}
