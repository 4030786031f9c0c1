use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::orders::error::OrderError;
use crate::orders::models::{Order, OrderLine, ResellerSnapshot};
use crate::orders::validation::ResolvedLine;

const ORDER_COLUMNS: &str = "id, reseller_id, reseller_name, reseller_email, \
     reseller_phone, reseller_address, delivery_date, created_at";

/// Persistence seam for the order lifecycle.
///
/// `OrdersRepository` is the PostgreSQL implementation; the service tests
/// substitute an in-memory store so the full mutation sequences run without
/// a database.
#[axum::async_trait]
pub trait OrderStore: Send + Sync {
    async fn create(
        &self,
        reseller: &ResellerSnapshot,
        delivery_date: NaiveDate,
        lines: &[ResolvedLine],
    ) -> Result<(Order, Vec<OrderLine>), OrderError>;

    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderError>;

    async fn find_all(&self) -> Result<Vec<Order>, OrderError>;

    async fn find_by_reseller(&self, reseller_id: i32) -> Result<Vec<Order>, OrderError>;

    async fn find_by_delivery_date(&self, date: NaiveDate) -> Result<Vec<Order>, OrderError>;

    async fn find_due_up_to(&self, anchor: NaiveDate) -> Result<Vec<Order>, OrderError>;

    async fn delivery_dates_for(&self, reseller_id: i32) -> Result<Vec<NaiveDate>, OrderError>;

    async fn find_lines(&self, order_id: Uuid) -> Result<Vec<OrderLine>, OrderError>;

    async fn find_lines_for(&self, order_ids: &[Uuid]) -> Result<Vec<OrderLine>, OrderError>;

    async fn replace_lines(
        &self,
        order_id: Uuid,
        lines: &[ResolvedLine],
    ) -> Result<Vec<OrderLine>, OrderError>;

    async fn delete(&self, order_id: Uuid) -> Result<(), OrderError>;
}

/// Repository for order persistence
#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[axum::async_trait]
impl OrderStore for OrdersRepository {
    /// Create one order with its lines in a transaction
    async fn create(
        &self,
        reseller: &ResellerSnapshot,
        delivery_date: NaiveDate,
        lines: &[ResolvedLine],
    ) -> Result<(Order, Vec<OrderLine>), OrderError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (reseller_id, reseller_name, reseller_email,
                                reseller_phone, reseller_address, delivery_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(reseller.id)
        .bind(&reseller.name)
        .bind(&reseller.email)
        .bind(&reseller.phone)
        .bind(&reseller.address)
        .bind(delivery_date)
        .fetch_one(&mut *tx)
        .await?;

        let mut stored_lines = Vec::with_capacity(lines.len());
        for line in lines {
            let stored = sqlx::query_as::<_, OrderLine>(
                r#"
                INSERT INTO order_lines (order_id, product_id, product_name, unit_price, quantity)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, order_id, product_id, product_name, unit_price, quantity
                "#,
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.unit_price)
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await?;
            stored_lines.push(stored);
        }

        tx.commit().await?;

        Ok((order, stored_lines))
    }

    /// Find an order by ID
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// All orders in the system, newest delivery first
    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY delivery_date DESC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// All orders belonging to one reseller, newest delivery first
    async fn find_by_reseller(&self, reseller_id: i32) -> Result<Vec<Order>, OrderError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS} FROM orders
            WHERE reseller_id = $1
            ORDER BY delivery_date DESC, created_at DESC
            "#
        ))
        .bind(reseller_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// All orders due on one calendar date, for the daily views
    async fn find_by_delivery_date(&self, date: NaiveDate) -> Result<Vec<Order>, OrderError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS} FROM orders
            WHERE delivery_date = $1
            ORDER BY reseller_name, created_at
            "#
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// All orders with a delivery date up to and including `anchor`,
    /// for the statistics window
    async fn find_due_up_to(&self, anchor: NaiveDate) -> Result<Vec<Order>, OrderError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS} FROM orders
            WHERE delivery_date <= $1
            ORDER BY delivery_date DESC
            "#
        ))
        .bind(anchor)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Delivery dates already taken by a reseller, for the duplicate-date
    /// check. Advisory only: the read and the subsequent insert are not
    /// isolated from concurrent writers.
    async fn delivery_dates_for(&self, reseller_id: i32) -> Result<Vec<NaiveDate>, OrderError> {
        let dates: Vec<(NaiveDate,)> =
            sqlx::query_as("SELECT delivery_date FROM orders WHERE reseller_id = $1")
                .bind(reseller_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(dates.into_iter().map(|(d,)| d).collect())
    }

    /// Lines of one order
    async fn find_lines(&self, order_id: Uuid) -> Result<Vec<OrderLine>, OrderError> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT id, order_id, product_id, product_name, unit_price, quantity
            FROM order_lines
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lines of many orders in one round trip
    async fn find_lines_for(&self, order_ids: &[Uuid]) -> Result<Vec<OrderLine>, OrderError> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT id, order_id, product_id, product_name, unit_price, quantity
            FROM order_lines
            WHERE order_id = ANY($1)
            ORDER BY order_id, id
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Replace an order's line set in a transaction
    async fn replace_lines(
        &self,
        order_id: Uuid,
        lines: &[ResolvedLine],
    ) -> Result<Vec<OrderLine>, OrderError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_lines WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        let mut stored_lines = Vec::with_capacity(lines.len());
        for line in lines {
            let stored = sqlx::query_as::<_, OrderLine>(
                r#"
                INSERT INTO order_lines (order_id, product_id, product_name, unit_price, quantity)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, order_id, product_id, product_name, unit_price, quantity
                "#,
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.unit_price)
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await?;
            stored_lines.push(stored);
        }

        tx.commit().await?;

        Ok(stored_lines)
    }

    /// Delete an order (lines cascade at the schema level)
    async fn delete(&self, order_id: Uuid) -> Result<(), OrderError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(OrderError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Repository methods are thin sqlx wrappers; they are exercised through
    // integration tests against a live database, outside the unit suite.
}
