//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    cart::{errors::into_status_error, handlers::CartMutationResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    pub product_uuid: Uuid,
    /// New quantity; zero or negative removes the entry.
    pub quantity: i64,
}

/// Update Cart Item Handler
///
/// Overwrites the quantity of an existing entry; a quantity of zero or
/// less removes it. Updating a product that is not in the cart is a
/// no-op.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;
    let session = depot.session_uuid_or_500()?;
    let request = json.into_inner();

    state
        .app
        .carts
        .update_quantity(session, request.product_uuid, request.quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartMutationResponse {
        message: "Cart updated".to_string(),
    }))
}
