//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::models::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Replaces every mutable field of the product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: u64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            category: request.category,
            price: request.price,
            image_url: request.image_url,
        }
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let updated = state
        .app
        .products
        .update_product(product.into_inner(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products/{product}").put(handler))
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .withf(move |u, update| *u == uuid && update.price == 15_00)
            .return_once(move |_, _| Ok(make_product(uuid, 15_00)));

        let body: ProductResponse =
            TestClient::put(format!("http://example.com/products/{uuid}"))
                .json(&json!({
                    "name": "Mug",
                    "description": "A mug",
                    "category": "kitchen",
                    "price": 15_00,
                }))
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        assert_eq!(body.uuid, uuid);
        assert_eq!(body.price, 15_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({
                "name": "Mug",
                "description": "A mug",
                "category": "kitchen",
                "price": 15_00,
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
