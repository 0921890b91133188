//! Saved delivery addresses.

use std::sync::Arc;

use edumall_core::schema::shipping::{CreateShippingInfo, ShippingAddress};
use edumall_core::{DataResponse, DeliveryInfoId, MessageResponse};
use tracing::instrument;

use super::Token;
use crate::api::shipping;
use crate::error::QueryResult;
use crate::query::{QueryKey, Resource};
use crate::state::AppState;

#[must_use]
pub const fn shipping_infos_key() -> QueryKey {
    QueryKey::new(Resource::ShippingInfos)
}

/// # Errors
///
/// Returns an error if the request fails or the response is malformed.
#[instrument(skip_all)]
pub async fn use_shipping_infos(
    state: &AppState,
) -> QueryResult<Arc<DataResponse<Vec<ShippingAddress>>>> {
    let token = Token::current(state);
    state
        .queries()
        .fetch(shipping_infos_key(), || {
            shipping::fetch_shipping_infos(state.http(), token.as_deref())
        })
        .await
}

/// # Errors
///
/// Returns an error if the body is invalid or the request fails.
#[instrument(skip(state, body), fields(tag = %body.tag))]
pub async fn use_create_shipping_info(
    state: &AppState,
    body: &CreateShippingInfo,
) -> QueryResult<DataResponse<ShippingAddress>> {
    let token = Token::current(state);
    state
        .queries()
        .mutate(
            shipping::create_shipping_info(state.http(), body, token.as_deref()),
            &[Resource::ShippingInfos],
        )
        .await
}

/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip(state))]
pub async fn use_delete_shipping_info(
    state: &AppState,
    id: &DeliveryInfoId,
) -> QueryResult<MessageResponse> {
    let token = Token::current(state);
    state
        .queries()
        .mutate(
            shipping::delete_shipping_info(state.http(), id, token.as_deref()),
            &[Resource::ShippingInfos],
        )
        .await
}
