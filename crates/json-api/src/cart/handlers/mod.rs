//! Cart Handlers

pub(crate) mod add_item;
pub(crate) mod clear;
pub(crate) mod get;
pub(crate) mod remove_item;
pub(crate) mod update_item;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Confirmation response for cart mutations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartMutationResponse {
    /// Confirmation message
    pub message: String,
}
