//! Orders

mod errors;
mod repository;
mod service;

pub mod models;

pub use errors::OrdersServiceError;
pub use service::{MockOrdersService, OrdersService, PgOrdersService, TAX_RATE_PERCENT, tax_amount};
