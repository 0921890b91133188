//! The caller's cart.

use std::sync::Arc;

use edumall_core::schema::cart::{Cart, CartDetail, UpdateCartItemQuantity};
use edumall_core::{CartDetailId, DataResponse, MessageResponse};
use tracing::instrument;

use super::Token;
use crate::api::cart;
use crate::error::QueryResult;
use crate::query::{QueryKey, Resource};
use crate::state::AppState;

#[must_use]
pub const fn cart_key() -> QueryKey {
    QueryKey::new(Resource::Cart)
}

/// # Errors
///
/// Returns an error if the request fails or the response is malformed.
#[instrument(skip_all)]
pub async fn use_cart(state: &AppState) -> QueryResult<Arc<DataResponse<Cart>>> {
    let token = Token::current(state);
    state
        .queries()
        .fetch(cart_key(), || cart::fetch_cart(state.http(), token.as_deref()))
        .await
}

/// Set a line item's quantity; the cart refetches afterwards.
///
/// # Errors
///
/// Returns an error if the body is invalid or the request fails.
#[instrument(skip(state, body), fields(cart_detail_id = %body.cart_detail_id, quantity = body.quantity))]
pub async fn use_update_cart_item_quantity(
    state: &AppState,
    body: &UpdateCartItemQuantity,
) -> QueryResult<DataResponse<CartDetail>> {
    let token = Token::current(state);
    state
        .queries()
        .mutate(
            cart::update_cart_item_quantity(state.http(), body, token.as_deref()),
            &[Resource::Cart],
        )
        .await
}

/// Remove a line item; the cart refetches afterwards.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip(state))]
pub async fn use_delete_cart_item(
    state: &AppState,
    id: &CartDetailId,
) -> QueryResult<MessageResponse> {
    let token = Token::current(state);
    state
        .queries()
        .mutate(
            cart::delete_cart_item(state.http(), id, token.as_deref()),
            &[Resource::Cart],
        )
        .await
}
