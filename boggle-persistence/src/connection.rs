use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://boggle.db?mode=rwc";

/// Open a connection pool for `database_url`.
///
/// SQLite pools hold exactly one connection, so transactions never overlap.
/// An in-memory database lives only as long as that connection, and the pool
/// recycles it after its maximum lifetime, so use one only for short runs.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    if database_url.starts_with("sqlite") {
        options.max_connections(1).min_connections(1);
    }
    options.sqlx_logging(false);

    Database::connect(options).await
}

pub async fn connect_to_memory_database() -> Result<DatabaseConnection, DbErr> {
    connect("sqlite::memory:").await
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = connect(database_url).await?;
    Migrator::up(&db, None).await?;
    info!("Database schema is up to date");
    Ok(db)
}
