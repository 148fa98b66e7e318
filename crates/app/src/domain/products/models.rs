//! Product Models

use jiff::Timestamp;
use uuid::Uuid;

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub uuid: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Price in minor units (cents).
    pub price: u64,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: u64,
    pub image_url: Option<String>,
}

/// Product Update Model
///
/// A full-field replacement; partial updates are not supported.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: u64,
    pub image_url: Option<String>,
}
