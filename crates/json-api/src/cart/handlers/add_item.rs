//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::ProductsServiceError;

use crate::{
    cart::{errors::into_status_error, handlers::CartMutationResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_uuid: Uuid,
    pub quantity: u64,
}

/// Add Cart Item Handler
///
/// Increments an existing entry or inserts a new one. The product must
/// exist at add time; its price is not frozen here — the cart re-reads
/// the catalog price whenever it is listed.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;
    let session = depot.session_uuid_or_500()?;
    let request = json.into_inner();

    if request.quantity == 0 {
        return Err(StatusError::bad_request().brief("Quantity must be greater than zero"));
    }

    match state.app.products.get_product(request.product_uuid).await {
        Ok(_product) => {}
        Err(ProductsServiceError::NotFound) => {
            return Err(StatusError::not_found().brief("Product not found"));
        }
        Err(error) => {
            return Err(crate::products::errors::into_status_error(error));
        }
    }

    state
        .app
        .carts
        .add_item(session, request.product_uuid, request.quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartMutationResponse {
        message: "Item added to cart".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{carts::MockCartsService, products::MockProductsService};

    use crate::test_helpers::{
        TEST_SESSION_UUID, make_product, products_and_carts_service,
    };

    use super::*;

    fn make_service(products: MockProductsService, carts: MockCartsService) -> Service {
        products_and_carts_service(products, carts, Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_success() -> TestResult {
        let product_uuid = Uuid::now_v7();

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .withf(move |uuid| *uuid == product_uuid)
            .return_once(move |_| Ok(make_product(product_uuid, 10_00)));

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |session, uuid, quantity| {
                *session == TEST_SESSION_UUID && *uuid == product_uuid && *quantity == 2
            })
            .return_once(|_, _, _| Ok(()));

        let body: CartMutationResponse = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": product_uuid, "quantity": 2 }))
            .send(&make_service(products, carts))
            .await
            .take_json()
            .await?;

        assert_eq!(body.message, "Item added to cart");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_zero_quantity_returns_400() -> TestResult {
        let products = MockProductsService::new();
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": Uuid::now_v7(), "quantity": 0 }))
            .send(&make_service(products, carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_unknown_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(|_| Err(storefront_app::domain::products::ProductsServiceError::NotFound));

        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(products, carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
