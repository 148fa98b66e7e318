//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::models::CartItem,
        orders::{
            errors::OrdersServiceError,
            models::{Order, OrderItem},
            repository::PgOrdersRepository,
        },
    },
};

/// Uniform sales tax applied to every order, in percent.
pub const TAX_RATE_PERCENT: u64 = 10;

/// Tax due on a subtotal, rounded half-up to the nearest minor unit.
#[must_use]
pub fn tax_amount(subtotal: u64) -> u64 {
    (subtotal * TAX_RATE_PERCENT + 50) / 100
}

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, cart_items: Vec<CartItem>) -> Result<Order, OrdersServiceError> {
        if cart_items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let subtotal: u64 = cart_items.iter().map(CartItem::subtotal).sum();
        let total_amount = subtotal + tax_amount(subtotal);

        // One transaction covers the order row and every item row; any
        // failure before the commit rolls the whole order back.
        let mut tx = self.db.begin().await?;

        let mut order = self
            .repository
            .create_order(&mut tx, Uuid::now_v7(), i64::try_from(total_amount)?)
            .await?;

        for cart_item in &cart_items {
            let item_uuid = Uuid::now_v7();

            self.repository
                .create_order_item(
                    &mut tx,
                    item_uuid,
                    order.uuid,
                    cart_item.product_uuid,
                    i64::try_from(cart_item.price)?,
                    i64::try_from(cart_item.quantity)?,
                )
                .await?;

            order.items.push(OrderItem {
                uuid: item_uuid,
                product_uuid: cart_item.product_uuid,
                product_name: cart_item.name.clone(),
                price_at_purchase: cart_item.price,
                quantity: cart_item.quantity,
            });
        }

        tx.commit().await?;

        tracing::info!(order_uuid = %order.uuid, total_amount, "order created");

        Ok(order)
    }

    async fn get_order(&self, uuid: Uuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.repository.get_order(&mut tx, uuid).await?;
        let items = self.repository.get_order_items(&mut tx, uuid).await?;

        tx.commit().await?;

        order.items = items;

        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.repository.list_orders(&mut tx).await?;

        for order in &mut orders {
            order.items = self.repository.get_order_items(&mut tx, order.uuid).await?;
        }

        tx.commit().await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert resolved cart items into a persisted order, atomically.
    ///
    /// Each item freezes the price the cart resolved at listing time into
    /// `price_at_purchase`. The caller clears the cart afterwards; this
    /// service never touches it.
    async fn create_order(&self, cart_items: Vec<CartItem>) -> Result<Order, OrdersServiceError>;

    /// Retrieve a single order with its items eagerly loaded.
    async fn get_order(&self, uuid: Uuid) -> Result<Order, OrdersServiceError>;

    /// Retrieve all orders, newest first, items eagerly loaded.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;
}
