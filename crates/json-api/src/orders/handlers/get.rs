//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::OrderResponse},
    state::State,
};

/// Get Order Handler
///
/// Returns an order with its items eagerly loaded.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
