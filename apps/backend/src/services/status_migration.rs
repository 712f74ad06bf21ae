//! One-off normalization of legacy status spellings.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::info;

use crate::errors::domain::DomainError;
use crate::repos::requests as requests_repo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResults {
    pub requests_updated: u64,
    pub backup_requests_updated: u64,
    pub final_status_distribution: Vec<StatusCount>,
    pub final_backup_status_distribution: Vec<StatusCount>,
}

fn counts(pairs: Vec<(String, i64)>) -> Vec<StatusCount> {
    pairs
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect()
}

/// Rewrite legacy spellings in live and backup requests. Run inside one transaction.
pub async fn normalize_statuses<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<MigrationResults, DomainError> {
    let (requests_updated, backup_requests_updated) =
        requests_repo::normalize_legacy_statuses(conn).await?;
    let (live, backups) = requests_repo::status_distributions(conn).await?;

    info!(
        requests_updated,
        backup_requests_updated, "Legacy request statuses normalized"
    );
    Ok(MigrationResults {
        requests_updated,
        backup_requests_updated,
        final_status_distribution: counts(live),
        final_backup_status_distribution: counts(backups),
    })
}
