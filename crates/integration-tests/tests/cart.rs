//! Cart reads, mutations and the refetches they trigger.

#![allow(clippy::unwrap_used)]

use edumall_client::hooks;
use edumall_client::{ApiError, QueryError};
use edumall_core::schema::cart::{Cart, UpdateCartItemQuantity};
use edumall_core::schema::order::CreateOrder;
use edumall_core::{CartDetailId, DataResponse, DeliveryInfoId, DeliveryMethod, Vnd};
use edumall_integration_tests::fixtures::{BOOK_LINE, COURSE_LINE, HOME_ADDRESS};
use edumall_integration_tests::{MockBackend, routes};

fn line(cart: &DataResponse<Cart>, id: &str) -> u32 {
    cart.data
        .cart_details
        .iter()
        .find(|d| d.id.as_str() == id)
        .map_or(0, |d| d.quantity)
}

#[tokio::test]
async fn test_update_quantity_refetches_cart() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;

    let before = hooks::cart::use_cart(&state).await.unwrap();
    assert_eq!(line(&before, BOOK_LINE), 1);
    assert_eq!(before.data.total_price, Vnd::new(649_000));

    // Served from cache
    hooks::cart::use_cart(&state).await.unwrap();
    assert_eq!(backend.hits(routes::CART), 1);

    let updated = hooks::cart::use_update_cart_item_quantity(
        &state,
        &UpdateCartItemQuantity {
            cart_detail_id: CartDetailId::new(BOOK_LINE),
            quantity: 2,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.data.total_price, Vnd::new(300_000));

    let after = hooks::cart::use_cart(&state).await.unwrap();
    assert_eq!(backend.hits(routes::CART), 2);
    assert_eq!(line(&after, BOOK_LINE), 2);
    assert_eq!(after.data.total_quantity, 3);
}

#[tokio::test]
async fn test_failed_mutation_keeps_cached_cart() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;
    hooks::cart::use_cart(&state).await.unwrap();

    let err = hooks::cart::use_update_cart_item_quantity(
        &state,
        &UpdateCartItemQuantity {
            cart_detail_id: CartDetailId::new("does-not-exist"),
            quantity: 2,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.api().unwrap().status(), Some(404));

    hooks::cart::use_cart(&state).await.unwrap();
    assert_eq!(backend.hits(routes::CART), 1);
}

#[tokio::test]
async fn test_invalid_quantity_is_never_sent() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;

    let err = hooks::cart::use_update_cart_item_quantity(
        &state,
        &UpdateCartItemQuantity {
            cart_detail_id: CartDetailId::new(BOOK_LINE),
            quantity: 0,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        QueryError::Api(ref api) if matches!(**api, ApiError::InvalidRequest(_))
    ));
    assert_eq!(backend.hits(routes::UPDATE_CART), 0);
}

#[tokio::test]
async fn test_delete_line_refetches_cart() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;
    hooks::cart::use_cart(&state).await.unwrap();

    let response = hooks::cart::use_delete_cart_item(&state, &CartDetailId::new(COURSE_LINE))
        .await
        .unwrap();
    assert!(!response.message.is_empty());

    let after = hooks::cart::use_cart(&state).await.unwrap();
    assert_eq!(backend.hits(routes::CART), 2);
    assert_eq!(after.data.cart_details.len(), 1);
    assert_eq!(line(&after, COURSE_LINE), 0);
}

#[tokio::test]
async fn test_order_empties_ordered_lines() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;
    hooks::cart::use_cart(&state).await.unwrap();

    let order = hooks::order::use_create_order(
        &state,
        &CreateOrder {
            array_cart_detail_ids: vec![CartDetailId::new(BOOK_LINE)],
            delivery_info_id: DeliveryInfoId::new(HOME_ADDRESS),
            deli_method: DeliveryMethod::Express,
        },
    )
    .await
    .unwrap();
    assert_eq!(order.data.total_price, Vnd::new(150_000));
    assert_eq!(order.data.shipping_fee, Vnd::new(50_000));

    let after = hooks::cart::use_cart(&state).await.unwrap();
    assert_eq!(backend.hits(routes::CART), 2);
    assert_eq!(line(&after, BOOK_LINE), 0);
}

#[tokio::test]
async fn test_cart_requires_token() {
    let backend = MockBackend::start().await;
    let state = backend.state();

    let err = hooks::cart::use_cart(&state).await.unwrap_err();

    assert!(err.api().unwrap().is_unauthorized());
    assert!(backend.last_authorization(routes::CART).is_none());
}
