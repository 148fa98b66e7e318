//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cart::{errors::into_status_error, handlers::CartMutationResponse},
    extensions::*,
    state::State,
};

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;
    let session = depot.session_uuid_or_500()?;

    state
        .app
        .carts
        .clear_cart(session)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartMutationResponse {
        message: "Cart cleared".to_string(),
    }))
}
