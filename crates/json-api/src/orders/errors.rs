//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Cart references an unknown product")
        }
        OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData
        | OrdersServiceError::InvalidAmount(_) => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order persistence error: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
    }
}
