//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    cart::{errors::into_status_error, handlers::CartMutationResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Idempotent: removing a product that is not in the cart still succeeds.
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;
    let session = depot.session_uuid_or_500()?;

    state
        .app
        .carts
        .remove_item(session, product.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartMutationResponse {
        message: "Item removed from cart".to_string(),
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
        carts_service(carts, Router::with_path("cart/items/{product}").delete(handler))
    }

    #[tokio::test]
    async fn test_remove_item_success() -> TestResult {
        let product_uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |session, uuid| *session == TEST_SESSION_UUID && *uuid == product_uuid)
            .return_once(|_, _| Ok(()));

        let body: CartMutationResponse =
            TestClient::delete(format!("http://example.com/cart/items/{product_uuid}"))
                .send(&make_service(carts))
                .await
                .take_json()
                .await?;

        assert_eq!(body.message, "Item removed from cart");

        Ok(())
    }
}
