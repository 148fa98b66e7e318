//! Order Handlers

pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod place;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::{Order, OrderItem};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Sum of line subtotals at their frozen prices, in minor units
    pub subtotal: u64,

    /// Tax portion of the total, in minor units
    pub tax: u64,

    /// The persisted total, in minor units; never recomputed
    pub total_amount: u64,

    /// The date and time the order was placed
    pub created_at: String,

    /// The order's line items, in creation order
    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let subtotal = order.subtotal();
        let tax = order.tax();

        Self {
            uuid: order.uuid,
            subtotal,
            tax,
            total_amount: order.total_amount,
            created_at: order.created_at.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The unique identifier of the order item
    pub uuid: Uuid,

    /// The product this line refers to
    pub product_uuid: Uuid,

    /// The product name at read time
    pub product_name: String,

    /// The price frozen at order-creation time, in minor units
    pub price_at_purchase: u64,

    /// The ordered quantity
    pub quantity: u64,

    /// Line subtotal at the frozen price, in minor units
    pub subtotal: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        let subtotal = item.subtotal();

        Self {
            uuid: item.uuid,
            product_uuid: item.product_uuid,
            product_name: item.product_name,
            price_at_purchase: item.price_at_purchase,
            quantity: item.quantity,
            subtotal,
        }
    }
}
