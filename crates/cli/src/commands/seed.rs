//! Database seeding command.
//!
//! Clears all entity tables (order items, orders, customers, products, in
//! that order) and inserts the fixture set, then prints a summary.
//!
//! # Usage
//!
//! ```bash
//! sg-cli seed
//! ```

use tracing::info;

use storegraph_api::config::ApiConfig;
use storegraph_api::{db, seed};

/// Reset the store to the fixture set.
///
/// # Errors
///
/// Returns an error if configuration is missing, the database is
/// unreachable, or any seeding statement fails (the store is then left
/// untouched).
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    let summary = seed::run(&pool).await?;

    info!("Database seeded successfully!");
    info!("Created {} customers", summary.customers);
    info!("Created {} products", summary.products);
    info!("Created {} orders", summary.orders);

    Ok(())
}
