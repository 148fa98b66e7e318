//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// All orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::domain::{
        carts::MockCartsService,
        orders::{MockOrdersService, models::Order},
    };

    use crate::test_helpers::orders_service;

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(
            MockCartsService::new(),
            orders,
            Router::with_path("orders").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_orders() -> TestResult {
        let uuid_newer = Uuid::now_v7();
        let uuid_older = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().once().return_once(move || {
            Ok(vec![
                Order {
                    uuid: uuid_newer,
                    total_amount: 27_50,
                    created_at: Timestamp::UNIX_EPOCH,
                    items: vec![],
                },
                Order {
                    uuid: uuid_older,
                    total_amount: 11_00,
                    created_at: Timestamp::UNIX_EPOCH,
                    items: vec![],
                },
            ])
        });

        let body: OrdersResponse = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        assert_eq!(body.orders.len(), 2, "expected both orders");
        assert_eq!(body.orders[0].uuid, uuid_newer);
        assert_eq!(body.orders[1].uuid, uuid_older);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().once().return_once(|| Ok(vec![]));

        let body: OrdersResponse = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        assert!(body.orders.is_empty());

        Ok(())
    }
}
