//! Database operations for the Storegraph `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `customers` - Customer accounts (unique email)
//! - `products` - Product catalog (price/stock invariants)
//! - `orders` - Orders referencing a customer
//! - `order_items` - Line items owned by an order (cascade-deleted)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p storegraph-cli -- migrate
//! ```

pub mod customers;
pub mod orders;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Embedded migrations for the Storegraph schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// A keyset pagination window over an id-ordered listing.
///
/// `after`/`before` are exclusive id bounds. `limit` callers typically set
/// to one more than the page size to detect a further page. `descending`
/// fetches from the tail of the window (for `last`-style pagination); rows
/// are returned in the fetch order.
#[derive(Debug, Default, Clone, Copy)]
pub struct Page {
    /// Exclusive lower id bound.
    pub after: Option<i32>,
    /// Exclusive upper id bound.
    pub before: Option<i32>,
    /// Maximum number of rows to fetch.
    pub limit: Option<i64>,
    /// Fetch in descending id order.
    pub descending: bool,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Build an `ILIKE` pattern matching `needle` anywhere in the column,
/// escaping the wildcard characters in the needle itself.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_plain() {
        assert_eq!(contains_pattern("alice"), "%alice%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn test_page_default_is_unbounded() {
        let page = Page::default();
        assert!(page.after.is_none());
        assert!(page.before.is_none());
        assert!(page.limit.is_none());
        assert!(!page.descending);
    }
}
