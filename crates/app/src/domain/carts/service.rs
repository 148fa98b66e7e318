//! Carts service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartContents, CartItem},
        },
        products::PgProductsRepository,
    },
    sessions::SessionStore,
};

/// Session key under which the serialized cart mapping is stored.
pub const CART_SESSION_KEY: &str = "cart";

/// Cart service backed by the session store.
///
/// The cart itself lives in the session as a product-to-quantity mapping;
/// the database is only consulted to resolve entries against the current
/// catalog when the cart is read.
#[derive(Clone)]
pub struct SessionCartsService {
    db: Db,
    products: PgProductsRepository,
    sessions: Arc<dyn SessionStore>,
}

impl fmt::Debug for SessionCartsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCartsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl SessionCartsService {
    #[must_use]
    pub fn new(db: Db, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            db,
            products: PgProductsRepository::new(),
            sessions,
        }
    }

    async fn load(&self, session: Uuid) -> Result<CartContents, CartsServiceError> {
        let Some(raw) = self.sessions.get(session, CART_SESSION_KEY).await else {
            return Ok(CartContents::default());
        };

        serde_json::from_str(&raw).map_err(CartsServiceError::Corrupt)
    }

    async fn save(&self, session: Uuid, cart: &CartContents) -> Result<(), CartsServiceError> {
        let raw = serde_json::to_string(cart)?;

        self.sessions.set(session, CART_SESSION_KEY, raw).await;

        Ok(())
    }
}

#[async_trait]
impl CartsService for SessionCartsService {
    async fn add_item(
        &self,
        session: Uuid,
        product_uuid: Uuid,
        quantity: u64,
    ) -> Result<(), CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut cart = self.load(session).await?;

        *cart.entry(product_uuid).or_insert(0) += quantity;

        self.save(session, &cart).await
    }

    async fn update_quantity(
        &self,
        session: Uuid,
        product_uuid: Uuid,
        quantity: i64,
    ) -> Result<(), CartsServiceError> {
        let mut cart = self.load(session).await?;

        match u64::try_from(quantity) {
            Ok(quantity) if quantity > 0 => {
                // Overwrites only an existing entry; an unknown product id
                // is a silent no-op, unlike add_item's insert-or-increment.
                if cart.contains_key(&product_uuid) {
                    cart.insert(product_uuid, quantity);

                    self.save(session, &cart).await?;
                }

                Ok(())
            }
            _ => {
                cart.remove(&product_uuid);

                self.save(session, &cart).await
            }
        }
    }

    async fn remove_item(
        &self,
        session: Uuid,
        product_uuid: Uuid,
    ) -> Result<(), CartsServiceError> {
        let mut cart = self.load(session).await?;

        cart.remove(&product_uuid);

        self.save(session, &cart).await
    }

    async fn clear_cart(&self, session: Uuid) -> Result<(), CartsServiceError> {
        self.sessions.remove(session, CART_SESSION_KEY).await;

        Ok(())
    }

    async fn get_cart_items(&self, session: Uuid) -> Result<Vec<CartItem>, CartsServiceError> {
        let cart = self.load(session).await?;

        if cart.is_empty() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<(Uuid, u64)> = cart.into_iter().collect();

        entries.sort_unstable_by_key(|(product_uuid, _quantity)| *product_uuid);

        let mut tx = self.db.begin().await?;
        let mut items = Vec::with_capacity(entries.len());

        for (product_uuid, quantity) in entries {
            // Entries whose product has been deleted are dropped, not
            // reported; the stored mapping is left untouched.
            if let Some(product) = self.products.find_product(&mut tx, product_uuid).await? {
                items.push(CartItem {
                    product_uuid: product.uuid,
                    name: product.name,
                    price: product.price,
                    quantity,
                    image_url: product.image_url,
                });
            } else {
                tracing::debug!(%product_uuid, "dropping cart entry for missing product");
            }
        }

        tx.commit().await?;

        Ok(items)
    }

    async fn get_total(&self, session: Uuid) -> Result<u64, CartsServiceError> {
        let items = self.get_cart_items(session).await?;

        Ok(items.iter().map(CartItem::subtotal).sum())
    }

    async fn get_cart_item_count(&self, session: Uuid) -> Result<u64, CartsServiceError> {
        let cart = self.load(session).await?;

        Ok(cart.values().sum())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add `quantity` of a product to the session's cart, incrementing any
    /// existing entry. Zero quantities are rejected.
    async fn add_item(
        &self,
        session: Uuid,
        product_uuid: Uuid,
        quantity: u64,
    ) -> Result<(), CartsServiceError>;

    /// Overwrite the quantity of an existing entry. A quantity of zero or
    /// less removes the entry; an unknown product id is a silent no-op.
    async fn update_quantity(
        &self,
        session: Uuid,
        product_uuid: Uuid,
        quantity: i64,
    ) -> Result<(), CartsServiceError>;

    /// Remove an entry. Idempotent.
    async fn remove_item(&self, session: Uuid, product_uuid: Uuid)
    -> Result<(), CartsServiceError>;

    /// Empty the session's cart.
    async fn clear_cart(&self, session: Uuid) -> Result<(), CartsServiceError>;

    /// Resolve the cart against the current catalog, carrying a live price
    /// snapshot taken now. Entries whose product no longer exists are
    /// silently dropped.
    async fn get_cart_items(&self, session: Uuid) -> Result<Vec<CartItem>, CartsServiceError>;

    /// Sum of `price * quantity` over the resolved items.
    async fn get_total(&self, session: Uuid) -> Result<u64, CartsServiceError>;

    /// Sum of raw stored quantities, including entries whose product has
    /// been deleted.
    async fn get_cart_item_count(&self, session: Uuid) -> Result<u64, CartsServiceError>;
}
