use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::DatabaseConfig;

/// Open the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.connection_url());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    Database::connect(opt).await
}

/// Create the submission tables if they are missing.
///
/// Safe to run on every start; existing tables and rows are left in place.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.get_schema_registry("promptboard::entity::*")
        .sync(db)
        .await?;
    info!("Database schema ready");
    Ok(())
}

/// Connect and make sure the schema exists.
pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let db = connect(config).await?;
    ensure_schema(&db).await?;
    Ok(db)
}
