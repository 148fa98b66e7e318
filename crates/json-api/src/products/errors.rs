//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::ReferencedByOrders => StatusError::bad_request()
            .brief("Cannot delete product that is referenced in existing orders"),
        ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData
        | ProductsServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("products storage error: {source}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
    }
}
