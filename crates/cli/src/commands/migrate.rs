//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! sg-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREGRAPH_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

use tracing::info;

use storegraph_api::config::ApiConfig;
use storegraph_api::db;

/// Run the embedded database migrations.
///
/// # Errors
///
/// Returns an error if configuration is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
