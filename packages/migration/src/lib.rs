//! Schema migrations for the tyre workflow database.

pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20251001_000001_init;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20251001_000001_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Applied-migration counts around one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub command: MigrationCommand,
    pub backend: sea_orm::DatabaseBackend,
    pub defined: usize,
    pub applied_before: usize,
    pub applied_after: usize,
    pub latest: Option<String>,
}

/// Run `command` against an open connection. Shared by the CLI and by
/// application startup.
pub async fn migrate(
    db: &DatabaseConnection,
    command: MigrationCommand,
) -> Result<MigrationReport, DbErr> {
    let backend = db.get_database_backend();
    let applied_before = count_applied_migrations(db).await?;
    tracing::debug!(?command, ?backend, applied_before, "running migration command");

    let outcome = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };
    if let Err(e) = outcome {
        tracing::error!(?command, ?backend, error = %e, "migration command failed");
        return Err(e);
    }

    let report = MigrationReport {
        command,
        backend,
        defined: Migrator::migrations().len(),
        applied_before,
        applied_after: count_applied_migrations(db).await?,
        latest: get_latest_migration_version(db).await?,
    };
    tracing::info!(
        ?command,
        ?backend,
        defined = report.defined,
        applied_before = report.applied_before,
        applied_after = report.applied_after,
        latest = report.latest.as_deref().unwrap_or("none"),
        "migration command finished"
    );
    Ok(report)
}

/// Zero when the migrations table does not exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(applied) => Ok(applied.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Name of the newest applied migration.
pub async fn get_latest_migration_version(db: &DatabaseConnection) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(applied) => Ok(applied.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
