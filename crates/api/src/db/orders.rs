//! Order repository for database operations.
//!
//! Order creation inserts the order row and all of its line items inside
//! one transaction; a failure on any insert rolls back the whole order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use storegraph_core::{CustomerId, OrderId, OrderItemId, ProductId};

use super::{Page, RepositoryError};
use crate::models::order::{NewOrderItem, Order, OrderItem};

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    customer_id: i32,
    total_amount: Decimal,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            total_amount: row.total_amount,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for `PostgreSQL` order item queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_id: i32,
    quantity: i32,
    unit_price: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

/// Optional predicates for order listings.
#[derive(Debug, Default, Clone)]
pub struct OrderListFilter {
    /// Only orders placed by this customer.
    pub customer_id: Option<CustomerId>,
    /// Inclusive lower bound on the total amount.
    pub min_total: Option<Decimal>,
    /// Inclusive upper bound on the total amount.
    pub max_total: Option<Decimal>,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(
            "SELECT id, customer_id, total_amount, created_at FROM orders WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create an order together with its line items.
    ///
    /// All inserts run inside one transaction: either the order and every
    /// item become visible, or none do.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails; the
    /// transaction is rolled back.
    pub async fn create_with_items(
        &self,
        customer_id: CustomerId,
        total_amount: Decimal,
        items: &[NewOrderItem],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: OrderRow = sqlx::query_as(
            r"
            INSERT INTO orders (customer_id, total_amount)
            VALUES ($1, $2)
            RETURNING id, customer_id, total_amount, created_at
            ",
        )
        .bind(customer_id.as_i32())
        .bind(total_amount)
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(row.id)
            .bind(item.product_id.as_i32())
            .bind(item.quantity)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(row.into())
    }

    /// List the line items of an order, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(
            r"
            SELECT id, order_id, product_id, quantity, unit_price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List orders matching the filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &OrderListFilter,
        page: &Page,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, customer_id, total_amount, created_at FROM orders WHERE TRUE",
        );

        if let Some(customer_id) = filter.customer_id {
            qb.push(" AND customer_id = ").push_bind(customer_id.as_i32());
        }
        if let Some(min_total) = filter.min_total {
            qb.push(" AND total_amount >= ").push_bind(min_total);
        }
        if let Some(max_total) = filter.max_total {
            qb.push(" AND total_amount <= ").push_bind(max_total);
        }
        if let Some(after) = page.after {
            qb.push(" AND id > ").push_bind(after);
        }
        if let Some(before) = page.before {
            qb.push(" AND id < ").push_bind(before);
        }
        qb.push(if page.descending {
            " ORDER BY id DESC"
        } else {
            " ORDER BY id ASC"
        });
        if let Some(limit) = page.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let rows: Vec<OrderRow> = qb.build_query_as().fetch_all(self.pool).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count all orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Count all order items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_items(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
