//! Products service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductUpdate},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

/// Reject products with blank required fields or a zero price before any
/// persistence attempt. The database constraints backstop the same rules.
fn validate_fields(
    name: &str,
    description: &str,
    category: &str,
    price: u64,
) -> Result<(), ProductsServiceError> {
    if name.trim().is_empty() || description.trim().is_empty() || category.trim().is_empty() {
        return Err(ProductsServiceError::MissingRequiredData);
    }

    if price == 0 {
        return Err(ProductsServiceError::InvalidData);
    }

    Ok(())
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        category: Option<String>,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_products(&mut tx, category.as_deref())
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, uuid: Uuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        validate_fields(
            &product.name,
            &product.description,
            &product.category,
            product.price,
        )?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(
                &mut tx,
                Uuid::now_v7(),
                i64::try_from(product.price)?,
                &product,
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        uuid: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        validate_fields(
            &update.name,
            &update.description,
            &update.category,
            update.price,
        )?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, uuid, i64::try_from(update.price)?, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, uuid: Uuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        // Proactive referential check; the FK RESTRICT constraint catches
        // the race where an order lands between this count and the delete.
        let referencing = self
            .repository
            .count_referencing_order_items(&mut tx, uuid)
            .await?;

        if referencing > 0 {
            return Err(ProductsServiceError::ReferencedByOrders);
        }

        let rows_affected = self.repository.delete_product(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve all products, optionally filtered by category
    /// (case-insensitive).
    async fn list_products(
        &self,
        category: Option<String>,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, uuid: Uuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product with a generated UUID.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Replaces all mutable fields of a product.
    async fn update_product(
        &self,
        uuid: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product, unless any order item references it.
    async fn delete_product(&self, uuid: Uuid) -> Result<(), ProductsServiceError>;
}
