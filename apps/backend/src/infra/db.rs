use std::future::Future;
use std::time::Duration;

use migration::{get_latest_migration_version, migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 1_000;

/// Retry a connection attempt with fixed interval delays.
/// Returns the result of the last attempt after all retries are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);
    match kind {
        // Every pooled connection to `sqlite::memory:` is its own database
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::SqliteFile => {
            opts.max_connections(1);
        }
        DbKind::MySql => {
            opts.max_connections(10)
                .connect_timeout(Duration::from_secs(10))
                .acquire_timeout(Duration::from_secs(10));
        }
    }
    opts
}

/// Connect to the configured database without touching the schema.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    let attempts = if kind == DbKind::MySql {
        CONNECT_ATTEMPTS
    } else {
        1
    };

    let conn = retry_connection(
        || {
            let opts = connect_options(kind, url.clone());
            async move { Database::connect(opts).await.map_err(AppError::from) }
        },
        attempts,
        CONNECT_RETRY_INTERVAL_MS,
    )
    .await?;

    if kind.is_sqlite() {
        conn.execute(Statement::from_string(
            conn.get_database_backend(),
            "PRAGMA foreign_keys = ON;",
        ))
        .await?;
    }

    info!(?kind, "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date. Single entrypoint for startup and tests.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind).await?;
    let report = migrate(&conn, MigrationCommand::Up).await?;
    info!(
        migration = report.latest.as_deref().unwrap_or("<none>"),
        newly_applied = report.applied_after.saturating_sub(report.applied_before),
        "schema ready"
    );
    Ok(conn)
}

/// Name of the newest applied migration, for the health check.
pub async fn latest_migration(conn: &DatabaseConnection) -> Result<Option<String>, AppError> {
    Ok(get_latest_migration_version(conn).await?)
}

/// Round-trip a trivial query.
pub async fn ping(conn: &DatabaseConnection) -> Result<(), AppError> {
    conn.execute(Statement::from_string(
        conn.get_database_backend(),
        "SELECT 1",
    ))
    .await?;
    Ok(())
}
