use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Open a pool with the given options
pub async fn connect(options: ConnectOptions) -> DatabaseResult<DatabaseConnection> {
    let db = Database::connect(options).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Open a pool from `config`, retrying with backoff while the server is unreachable.
///
/// `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    let options = config.into_connect_options();
    let attempt = || connect(options.clone());

    match retry_config {
        Some(retry_config) => retry_with_backoff(attempt, retry_config).await,
        None => retry(attempt).await,
    }
}

/// Apply every pending migration of `M`
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> DatabaseResult<()> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError {
            app: app_name.to_string(),
            details: e.to_string(),
        })?;
    info!(app = app_name, "Migrations complete");
    Ok(())
}
