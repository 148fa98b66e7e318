//! Products

mod errors;
mod repository;
mod service;

pub mod models;

pub use errors::ProductsServiceError;
pub(crate) use repository::PgProductsRepository;
pub use service::{MockProductsService, PgProductsService, ProductsService};
