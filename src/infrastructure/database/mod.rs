pub mod entities;
pub mod migrator;
pub mod repositories;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./courses.db?mode=rwc")
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./courses.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }

    /// Private in-memory SQLite database.
    ///
    /// Limited to a single connection: every pooled connection to
    /// `sqlite::memory:` would otherwise open its own empty database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut opts = ConnectOptions::new(config.url.clone());
    opts.max_connections(config.max_connections)
        .sqlx_logging(false);
    let db = Database::connect(opts).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Connect and bring the schema up to date
pub async fn init_database_with_migrations(
    config: &DatabaseConfig,
) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let db = init_database(config).await?;
    info!("Running database migrations...");
    Migrator::up(&db, None).await?;
    info!("Migrations completed");
    Ok(db)
}
