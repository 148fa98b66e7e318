//! Carts

mod errors;
mod service;

pub mod models;

pub use errors::CartsServiceError;
pub use service::{CART_SESSION_KEY, CartsService, MockCartsService, SessionCartsService};
