//! Product repository for database operations.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use storegraph_core::ProductId;

use super::{Page, RepositoryError, contains_pattern};
use crate::models::product::{NewProduct, Product};

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: Decimal,
    stock: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            stock: row.stock,
        }
    }
}

/// Optional predicates for product listings.
#[derive(Debug, Default, Clone)]
pub struct ProductListFilter {
    /// Case-insensitive substring match on the name.
    pub name_contains: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> =
            sqlx::query_as("SELECT id, name, price, stock FROM products WHERE id = $1")
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(
            r"
            INSERT INTO products (name, price, stock)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, stock
            ",
        )
        .bind(&new.name)
        .bind(new.price)
        .bind(new.stock)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List products matching the filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &ProductListFilter,
        page: &Page,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT id, name, price, stock FROM products WHERE TRUE");

        if let Some(name) = &filter.name_contains {
            qb.push(" AND name ILIKE ").push_bind(contains_pattern(name));
        }
        if let Some(min_price) = filter.min_price {
            qb.push(" AND price >= ").push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            qb.push(" AND price <= ").push_bind(max_price);
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

        let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(self.pool).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
