use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use super::storage::migrations::Migrator;
use crate::config::DatabaseConfig;

/// Open the review store pool.
///
/// In-memory `SQLite` is pinned to a single connection so every query sees
/// the same database.
///
/// # Errors
/// Returns `DbErr` when the DSN is unset or unsupported or the pool cannot be created.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    if cfg.url.trim().is_empty() {
        return Err(DbErr::Custom(
            "database.url is not set (DATABASE_URL or NEXAFORGE__DATABASE__URL)".to_owned(),
        ));
    }

    let mut opts = ConnectOptions::new(cfg.url.clone());
    let max_connections = if cfg.url.contains(":memory:") {
        1
    } else {
        cfg.max_connections.max(1)
    };
    opts.max_connections(max_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .sqlx_logging(false);

    tracing::info!(
        url = %redact_credentials_in_dsn(&cfg.url),
        max_connections,
        "connecting to review store"
    );
    Database::connect(opts).await
}

/// Bring the schema up to date.
///
/// # Errors
/// Returns `DbErr` if a migration fails.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    tracing::info!("running review store migrations");
    Migrator::up(db, None).await
}

/// Redact credentials from DSN for logging.
#[must_use]
pub fn redact_credentials_in_dsn(dsn: &str) -> String {
    if !dsn.contains('@') {
        return dsn.to_owned();
    }
    match url::Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                // only fails for cannot-be-a-base URLs, which carry no password
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_owned(),
    }
}
