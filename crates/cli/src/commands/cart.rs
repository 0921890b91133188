//! Cart commands. Mutations print the cart as refetched afterwards.

use edumall_client::AppState;
use edumall_client::hooks;
use edumall_core::CartDetailId;
use edumall_core::schema::cart::UpdateCartItemQuantity;

use super::{CliError, print_json};

pub async fn show(state: &AppState) -> Result<(), CliError> {
    let cart = hooks::cart::use_cart(state).await?;
    tracing::info!(
        lines = cart.data.cart_details.len(),
        total = %cart.data.total_price,
        "Fetched cart"
    );
    print_json(&*cart)
}

pub async fn update(state: &AppState, detail: String, quantity: u32) -> Result<(), CliError> {
    // Warm the cache so the refetch after the mutation is observable in logs
    hooks::cart::use_cart(state).await?;

    let body = UpdateCartItemQuantity {
        cart_detail_id: CartDetailId::new(detail),
        quantity,
    };
    hooks::cart::use_update_cart_item_quantity(state, &body).await?;
    show(state).await
}

pub async fn remove(state: &AppState, detail: String) -> Result<(), CliError> {
    hooks::cart::use_cart(state).await?;

    let response = hooks::cart::use_delete_cart_item(state, &CartDetailId::new(detail)).await?;
    tracing::info!(message = %response.message, "Cart line removed");
    show(state).await
}
