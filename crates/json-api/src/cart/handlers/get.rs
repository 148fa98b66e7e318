//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::CartItem;

use crate::{cart::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The resolved cart items
    pub items: Vec<CartItemResponse>,

    /// Sum of `price * quantity` over the resolved items, in minor units
    pub total: u64,
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The product in this cart entry
    pub product_uuid: Uuid,

    /// The product name at read time
    pub name: String,

    /// The current catalog price in minor units
    pub price: u64,

    /// The desired quantity
    pub quantity: u64,

    /// Line subtotal in minor units
    pub subtotal: u64,

    /// Optional image reference
    pub image_url: Option<String>,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        let subtotal = item.subtotal();

        Self {
            product_uuid: item.product_uuid,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            subtotal,
            image_url: item.image_url,
        }
    }
}

/// Get Cart Handler
///
/// Resolves the session's cart against the current catalog. Prices are
/// live: they reflect the catalog as of this request.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;
    let session = depot.session_uuid_or_500()?;

    let items = state
        .app
        .carts
        .get_cart_items(session)
        .await
        .map_err(into_status_error)?;

    let total = items.iter().map(CartItem::subtotal).sum();

    Ok(Json(CartResponse {
        items: items.into_iter().map(Into::into).collect(),
        total,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::MockCartsService;

    use crate::test_helpers::{TEST_SESSION_UUID, carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart").get(handler))
    }

    fn make_item(product_uuid: Uuid, price: u64, quantity: u64) -> CartItem {
        CartItem {
            product_uuid,
            name: "Mug".to_string(),
            price,
            quantity,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_get_cart_returns_items_and_total() -> TestResult {
        let product_a = Uuid::now_v7();
        let product_b = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart_items()
            .once()
            .withf(|session| *session == TEST_SESSION_UUID)
            .return_once(move |_| {
                Ok(vec![
                    make_item(product_a, 10_00, 2),
                    make_item(product_b, 5_00, 1),
                ])
            });

        let body: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(body.items.len(), 2, "expected both entries");
        assert_eq!(body.items[0].subtotal, 20_00);
        assert_eq!(body.total, 25_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_empty_cart_returns_zero_total() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart_items()
            .once()
            .return_once(|_| Ok(vec![]));

        let body: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert!(body.items.is_empty());
        assert_eq!(body.total, 0);

        Ok(())
    }
}
