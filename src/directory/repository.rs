use sqlx::PgPool;
use std::collections::HashMap;

use crate::directory::error::DirectoryError;
use crate::directory::models::{CatalogEntry, Ingredient, Product, Reseller, UpdateResellerRequest};
use crate::orders::cutoff;

/// Lookup seam for reseller accounts, faked in the order service tests
#[axum::async_trait]
pub trait ResellerLookup: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Reseller>, DirectoryError>;
}

/// Lookup seam for products, faked in the order service tests
#[axum::async_trait]
pub trait ProductLookup: Send + Sync {
    async fn find_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, Product>, DirectoryError>;
}

/// Repository for reseller lookups and the synchronous snapshot cascade.
///
/// Orders denormalize the reseller contact data; the update/delete contract
/// of the directory is to keep the snapshot of every future order
/// (delivery date from tomorrow onward) consistent in the same operation.
#[derive(Clone)]
pub struct ResellerDirectory {
    pool: PgPool,
}

impl ResellerDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[axum::async_trait]
impl ResellerLookup for ResellerDirectory {
    /// Find a reseller with its personalized catalog
    async fn find_by_id(&self, id: i32) -> Result<Option<Reseller>, DirectoryError> {
        let row: Option<(i32, String, String, String, String)> = sqlx::query_as(
            "SELECT id, name, email, phone, address FROM resellers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, name, email, phone, address)) = row else {
            return Ok(None);
        };

        let catalog = sqlx::query_as::<_, CatalogEntry>(
            "SELECT product_id, price FROM reseller_catalog WHERE reseller_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Reseller {
            id,
            name,
            email,
            phone,
            address,
            catalog,
        }))
    }
}

impl ResellerDirectory {
    /// Update a reseller's contact data and propagate the new snapshot into
    /// all of its future orders, in one transaction.
    pub async fn update_reseller(
        &self,
        id: i32,
        request: &UpdateResellerRequest,
    ) -> Result<(), DirectoryError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE resellers
            SET name = $1, email = $2, phone = $3, address = $4
            WHERE id = $5
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(DirectoryError::ResellerNotFound(id));
        }

        let synced = sqlx::query(
            r#"
            UPDATE orders
            SET reseller_name = $1, reseller_email = $2,
                reseller_phone = $3, reseller_address = $4
            WHERE reseller_id = $5 AND delivery_date >= $6
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(id)
        .bind(cutoff::start_of_tomorrow())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Updated reseller {} and synced {} future order snapshots",
            id,
            synced.rows_affected()
        );
        Ok(())
    }

    /// Delete a reseller, cascade-deleting its future orders. Past orders
    /// are kept for the statistics history.
    pub async fn delete_reseller(&self, id: i32) -> Result<(), DirectoryError> {
        let mut tx = self.pool.begin().await?;

        let removed_orders = sqlx::query(
            "DELETE FROM orders WHERE reseller_id = $1 AND delivery_date >= $2",
        )
        .bind(id)
        .bind(cutoff::start_of_tomorrow())
        .execute(&mut *tx)
        .await?;

        let removed = sqlx::query("DELETE FROM resellers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if removed.rows_affected() == 0 {
            return Err(DirectoryError::ResellerNotFound(id));
        }

        tx.commit().await?;

        tracing::info!(
            "Deleted reseller {} and {} of its future orders",
            id,
            removed_orders.rows_affected()
        );
        Ok(())
    }
}

/// Repository for product lookups and the product deletion cascade
#[derive(Clone)]
pub struct ProductCatalog {
    pool: PgPool,
}

impl ProductCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[axum::async_trait]
impl ProductLookup for ProductCatalog {
    /// Find products with their recipes, keyed by id
    async fn find_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, Product>, DirectoryError> {
        let rows: Vec<(i32, String)> =
            sqlx::query_as("SELECT id, name FROM products WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;

        let mut products: HashMap<i32, Product> = rows
            .into_iter()
            .map(|(id, name)| {
                (
                    id,
                    Product {
                        id,
                        name,
                        ingredients: Vec::new(),
                    },
                )
            })
            .collect();

        let ingredients: Vec<(i32, Ingredient)> = sqlx::query_as::<
            _,
            (i32, String, rust_decimal::Decimal, String),
        >(
            r#"
            SELECT product_id, name, quantity, unit
            FROM product_ingredients
            WHERE product_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(product_id, name, quantity, unit)| {
            (
                product_id,
                Ingredient {
                    name,
                    quantity,
                    unit,
                },
            )
        })
        .collect();

        for (product_id, ingredient) in ingredients {
            if let Some(product) = products.get_mut(&product_id) {
                product.ingredients.push(ingredient);
            }
        }

        Ok(products)
    }
}

impl ProductCatalog {
    /// Delete a product and cascade: remove it from every reseller catalog,
    /// strip its lines from future orders, and drop future orders left
    /// without any line (an order must always have at least one).
    pub async fn delete_product(&self, id: i32) -> Result<(), DirectoryError> {
        let tomorrow = cutoff::start_of_tomorrow();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reseller_catalog WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let stripped = sqlx::query(
            r#"
            DELETE FROM order_lines l
            USING orders o
            WHERE l.order_id = o.id AND l.product_id = $1 AND o.delivery_date >= $2
            "#,
        )
        .bind(id)
        .bind(tomorrow)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            DELETE FROM orders o
            WHERE o.delivery_date >= $1
              AND NOT EXISTS (SELECT 1 FROM order_lines l WHERE l.order_id = o.id)
            "#,
        )
        .bind(tomorrow)
        .execute(&mut *tx)
        .await?;

        let removed = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if removed.rows_affected() == 0 {
            return Err(DirectoryError::ProductNotFound(id));
        }

        tx.commit().await?;

        tracing::info!(
            "Deleted product {}, stripped {} future order lines",
            id,
            stripped.rows_affected()
        );
        Ok(())
    }
}
