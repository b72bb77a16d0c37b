//! One-shot database seeding with a fixed fixture set.
//!
//! Seeding is destructive: all rows of the four tables are deleted (in
//! dependency order) before the fixtures are inserted, all inside one
//! transaction. Fixture rows are written directly and bypass mutation-level
//! validation.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::db::RepositoryError;

/// Counts of the rows created by a seeding run.
#[derive(Debug, Clone, Copy)]
pub struct SeedSummary {
    /// Customers inserted.
    pub customers: usize,
    /// Products inserted.
    pub products: usize,
    /// Orders inserted (each with its line items).
    pub orders: usize,
}

/// Clear all entity tables and insert the fixture set.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement fails; the
/// transaction is rolled back and the store is left untouched.
pub async fn run(pool: &PgPool) -> Result<SeedSummary, RepositoryError> {
    let mut tx = pool.begin().await?;

    // Clear existing data in dependency order
    sqlx::query("DELETE FROM order_items").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM orders").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM customers").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM products").execute(&mut *tx).await?;

    // Create customers
    let customers: [(&str, &str, Option<&str>); 3] = [
        ("Alice Johnson", "alice@example.com", Some("+1234567890")),
        ("Bob Smith", "bob@example.com", Some("123-456-7890")),
        ("Carol Davis", "carol@example.com", Some("+44555123456")),
    ];
    let mut customer_ids = Vec::with_capacity(customers.len());
    for (name, email, phone) in customers {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO customers (name, email, phone) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .fetch_one(&mut *tx)
        .await?;
        customer_ids.push(id);
    }

    // Create products
    let products: [(&str, Decimal, i32); 4] = [
        ("Laptop", Decimal::new(99999, 2), 10),
        ("Mouse", Decimal::new(2999, 2), 50),
        ("Keyboard", Decimal::new(7999, 2), 25),
        ("Monitor", Decimal::new(29999, 2), 5),
    ];
    let mut product_rows = Vec::with_capacity(products.len());
    for (name, price, stock) in products {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO products (name, price, stock) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(price)
        .bind(stock)
        .fetch_one(&mut *tx)
        .await?;
        product_rows.push((id, price));
    }

    // Create orders: Alice gets Laptop + Mouse, Bob gets Monitor + Keyboard
    let order_specs: [(i32, [usize; 2]); 2] = [
        (customer_ids[0], [0, 1]),
        (customer_ids[1], [3, 2]),
    ];
    for (customer_id, item_indexes) in order_specs {
        let total: Decimal = item_indexes.iter().map(|&i| product_rows[i].1).sum();
        insert_order(&mut tx, customer_id, total, &item_indexes.map(|i| product_rows[i]))
            .await?;
    }

    tx.commit().await?;

    Ok(SeedSummary {
        customers: customers.len(),
        products: products.len(),
        orders: order_specs.len(),
    })
}

async fn insert_order(
    tx: &mut Transaction<'_, Postgres>,
    customer_id: i32,
    total_amount: Decimal,
    items: &[(i32, Decimal)],
) -> Result<(), RepositoryError> {
    let order_id: i32 = sqlx::query_scalar(
        "INSERT INTO orders (customer_id, total_amount) VALUES ($1, $2) RETURNING id",
    )
    .bind(customer_id)
    .bind(total_amount)
    .fetch_one(&mut **tx)
    .await?;

    for (product_id, unit_price) in items {
        sqlx::query(
            r"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, 1, $3)
            ",
        )
        .bind(order_id)
        .bind(product_id)
        .bind(unit_price)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
