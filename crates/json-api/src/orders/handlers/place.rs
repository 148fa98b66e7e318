//! Place Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{cart, extensions::*, orders::errors::into_status_error, state::State};

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    /// The created order UUID
    pub uuid: Uuid,

    /// The persisted total, in minor units
    pub total_amount: u64,

    /// Confirmation message
    pub message: String,
}

/// Place Order Handler
///
/// Resolves the session's cart, persists an order from it atomically,
/// and clears the cart only once the order has committed. The prices
/// frozen into the order are the ones resolved by this request's cart
/// read.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;
    let session = depot.session_uuid_or_500()?;

    let cart_items = state
        .app
        .carts
        .get_cart_items(session)
        .await
        .map_err(cart::errors::into_status_error)?;

    if cart_items.is_empty() {
        return Err(StatusError::bad_request().brief("Cart is empty"));
    }

    let order = state
        .app
        .orders
        .create_order(cart_items)
        .await
        .map_err(into_status_error)?;

    // The cart survives any order failure above; it is only cleared once
    // the order has durably committed.
    state
        .app
        .carts
        .clear_cart(session)
        .await
        .map_err(cart::errors::into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderPlacedResponse {
        uuid: order.uuid,
        total_amount: order.total_amount,
        message: "Order placed successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{MockCartsService, models::CartItem},
        orders::{
            MockOrdersService, OrdersServiceError,
            models::{Order, OrderItem},
        },
    };

    use crate::test_helpers::{TEST_SESSION_UUID, orders_service};

    use super::*;

    fn make_service(carts: MockCartsService, orders: MockOrdersService) -> Service {
        orders_service(carts, orders, Router::with_path("orders").post(handler))
    }

    fn make_cart_item(product_uuid: Uuid, price: u64, quantity: u64) -> CartItem {
        CartItem {
            product_uuid,
            name: "Mug".to_string(),
            price,
            quantity,
            image_url: None,
        }
    }

    fn make_order(uuid: Uuid, total_amount: u64, items: Vec<OrderItem>) -> Order {
        Order {
            uuid,
            total_amount,
            created_at: Timestamp::UNIX_EPOCH,
            items,
        }
    }

    #[tokio::test]
    async fn test_place_order_creates_order_and_clears_cart() -> TestResult {
        let order_uuid = Uuid::now_v7();
        let product_uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart_items()
            .once()
            .withf(|session| *session == TEST_SESSION_UUID)
            .return_once(move |_| Ok(vec![make_cart_item(product_uuid, 10_00, 2)]));

        carts
            .expect_clear_cart()
            .once()
            .withf(|session| *session == TEST_SESSION_UUID)
            .return_once(|_| Ok(()));

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(move |items| items.len() == 1 && items[0].price == 10_00)
            .return_once(move |_| Ok(make_order(order_uuid, 22_00, vec![])));

        let mut res = TestClient::post("http://example.com/orders")
            .send(&make_service(carts, orders))
            .await;

        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{order_uuid}").as_str()));

        let body: OrderPlacedResponse = res.take_json().await?;

        assert_eq!(body.uuid, order_uuid);
        assert_eq!(body.total_amount, 22_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_with_empty_cart_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart_items()
            .once()
            .return_once(|_| Ok(vec![]));

        carts.expect_clear_cart().never();

        let mut orders = MockOrdersService::new();

        orders.expect_create_order().never();

        let res = TestClient::post("http://example.com/orders")
            .send(&make_service(carts, orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_failure_leaves_cart_intact() -> TestResult {
        let product_uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart_items()
            .once()
            .return_once(move |_| Ok(vec![make_cart_item(product_uuid, 10_00, 1)]));

        // The cart must not be cleared when order persistence fails.
        carts.expect_clear_cart().never();

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/orders")
            .send(&make_service(carts, orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
