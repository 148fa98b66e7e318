//! Order Models

use jiff::Timestamp;
use uuid::Uuid;

/// Order Model
///
/// Immutable once created; the persisted total is never recomputed, so
/// later catalog price changes cannot affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: Uuid,
    /// Subtotal plus tax, in minor units, fixed at creation time.
    pub total_amount: u64,
    pub created_at: Timestamp,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Sum of line subtotals at their frozen prices.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.items.iter().map(OrderItem::subtotal).sum()
    }

    /// Tax portion of the persisted total.
    #[must_use]
    pub fn tax(&self) -> u64 {
        self.total_amount.saturating_sub(self.subtotal())
    }
}

/// Order Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    /// The product price frozen at order-creation time, in minor units.
    pub price_at_purchase: u64,
    pub quantity: u64,
}

impl OrderItem {
    /// Line subtotal at the frozen price.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.price_at_purchase * self.quantity
    }
}
