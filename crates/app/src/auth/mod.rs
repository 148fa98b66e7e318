//! Authentication
//!
//! Both authentication schemes (session cookie and opaque bearer token)
//! resolve to the same [`Principal`]; scheme selection is the HTTP
//! layer's concern and never leaks into the cart or order services.

mod errors;
mod models;
mod password;
mod repository;
mod service;
mod token;

pub use errors::AuthServiceError;
pub use models::{IssuedApiToken, NewUser, Principal, User};
pub use service::{AuthService, MockAuthService, PgAuthService};
pub use token::{ApiTokenError, TokenHmacKey};
