//! Checkout.

use edumall_core::DataResponse;
use edumall_core::schema::order::{CreateOrder, Order};
use tracing::instrument;

use super::Token;
use crate::api::order;
use crate::error::QueryResult;
use crate::query::Resource;
use crate::state::AppState;

/// Place an order. Ordered lines leave the cart, so it refetches afterwards.
///
/// # Errors
///
/// Returns an error if the body is invalid or the request fails.
#[instrument(skip(state, body), fields(lines = body.array_cart_detail_ids.len()))]
pub async fn use_create_order(state: &AppState, body: &CreateOrder) -> QueryResult<DataResponse<Order>> {
    let token = Token::current(state);
    state
        .queries()
        .mutate(
            order::create_order(state.http(), body, token.as_deref()),
            &[Resource::Cart],
        )
        .await
}
