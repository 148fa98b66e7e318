//! Cart Models

use rustc_hash::FxHashMap;
use uuid::Uuid;

/// The raw cart mapping as stored in the session: product UUID to
/// desired quantity. Quantities are always at least one; an entry is
/// removed rather than stored with a zero quantity.
pub type CartContents = FxHashMap<Uuid, u64>;

/// A cart entry resolved against the current catalog.
///
/// `price` is a live snapshot taken at read time; it can differ between
/// two reads of the same cart when the catalog price changes in between.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product_uuid: Uuid,
    pub name: String,
    /// Price in minor units at the moment the cart was read.
    pub price: u64,
    pub quantity: u64,
    pub image_url: Option<String>,
}

impl CartItem {
    /// Line subtotal at the resolved price.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.price * self.quantity
    }
}
