//! Request repository functions: live rows, their images, and soft-delete backups.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::requests_sea::{self as requests_adapter, backups};
pub use crate::adapters::requests_sea::backups::Deletion;
pub use crate::adapters::requests_sea::{OrderWrite, RequestCreate, RequestUpdate, StatusWrite};
use crate::domain::eligibility::{cooldown_window_start, PriorRequest};
use crate::domain::status::{RequestStatus, LEGACY_SPELLINGS};
use crate::entities::{request_backups, requests};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// A live request with its status checked and image URLs attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    pub row: requests::Model,
    pub status: RequestStatus,
    pub images: Vec<String>,
}

/// A soft-deleted request with its image URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedRequestRecord {
    pub row: request_backups::Model,
    pub status: RequestStatus,
    pub images: Vec<String>,
}

fn request_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Request, "Request not found")
}

/// Stored spellings (canonical and legacy) of every status matching `pred`.
fn stored_spellings(pred: impl Fn(RequestStatus) -> bool) -> Vec<&'static str> {
    RequestStatus::ALL
        .into_iter()
        .filter(|s| pred(*s))
        .map(RequestStatus::as_str)
        .chain(
            LEGACY_SPELLINGS
                .iter()
                .filter(|(_, s)| pred(*s))
                .map(|(legacy, _)| *legacy),
        )
        .collect()
}

fn group_images<I>(images: I) -> HashMap<i64, Vec<String>>
where
    I: IntoIterator<Item = (i64, String)>,
{
    let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
    for (request_id, path) in images {
        grouped.entry(request_id).or_default().push(path);
    }
    grouped
}

async fn attach_images<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rows: Vec<requests::Model>,
) -> Result<Vec<RequestRecord>, DomainError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut images = group_images(
        requests_adapter::images_for(conn, &ids)
            .await?
            .into_iter()
            .map(|img| (img.request_id, img.image_path)),
    );

    rows.into_iter()
        .map(|row| {
            Ok(RequestRecord {
                status: RequestStatus::from_db(&row.status)?,
                images: images.remove(&row.id).unwrap_or_default(),
                row,
            })
        })
        .collect()
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RequestCreate,
    images: Vec<(i32, String)>,
) -> Result<RequestRecord, DomainError> {
    let row = requests_adapter::insert(conn, dto).await?;
    requests_adapter::insert_images(conn, row.id, &images).await?;
    load(conn, row.id).await
}

pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<requests::Model, DomainError> {
    requests_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(request_not_found)
}

/// One request with its images.
pub async fn load<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<RequestRecord, DomainError> {
    let row = require(conn, id).await?;
    let mut records = attach_images(conn, vec![row]).await?;
    records.pop().ok_or_else(request_not_found)
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<RequestRecord>, DomainError> {
    let rows = requests_adapter::list(conn).await?;
    attach_images(conn, rows).await
}

pub async fn list_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<RequestRecord>, DomainError> {
    let rows = requests_adapter::list_by_user(conn, user_id).await?;
    attach_images(conn, rows).await
}

/// Exact vehicle number match, falling back to a substring search.
pub async fn find_by_vehicle<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    vehicle_number: &str,
) -> Result<Vec<RequestRecord>, DomainError> {
    let mut rows = requests_adapter::find_by_vehicle_exact(conn, vehicle_number).await?;
    if rows.is_empty() {
        rows = requests_adapter::search_by_vehicle(conn, vehicle_number).await?;
    }
    attach_images(conn, rows).await
}

/// The vehicle's open requests and its requests fulfilled inside the cooldown window.
pub async fn eligibility_facts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    vehicle_number: &str,
    now: OffsetDateTime,
) -> Result<(Vec<PriorRequest>, Vec<PriorRequest>), DomainError> {
    let to_prior = |rows: Vec<requests::Model>| -> Result<Vec<PriorRequest>, DomainError> {
        rows.into_iter()
            .map(|r| {
                Ok(PriorRequest {
                    id: r.id,
                    status: RequestStatus::from_db(&r.status)?,
                    submitted_at: r.submitted_at,
                })
            })
            .collect()
    };

    let open = requests_adapter::for_vehicle_with_status(
        conn,
        vehicle_number,
        stored_spellings(RequestStatus::is_open),
        None,
    )
    .await?;
    let fulfilled = requests_adapter::for_vehicle_with_status(
        conn,
        vehicle_number,
        stored_spellings(RequestStatus::counts_as_fulfilled),
        Some(cooldown_window_start(now)),
    )
    .await?;

    Ok((to_prior(open)?, to_prior(fulfilled)?))
}

pub async fn update_fields<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: RequestUpdate,
) -> Result<RequestRecord, DomainError> {
    let existing = require(conn, id).await?;
    requests_adapter::update_fields(conn, existing, dto).await?;
    load(conn, id).await
}

pub async fn write_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    write: StatusWrite,
) -> Result<RequestRecord, DomainError> {
    let existing = require(conn, id).await?;
    requests_adapter::write_status(conn, existing, write).await?;
    load(conn, id).await
}

pub async fn write_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: requests::Model,
    write: OrderWrite,
) -> Result<requests::Model, DomainError> {
    Ok(requests_adapter::write_order(conn, existing, write).await?)
}

/// Move a request and its images into the backup tables.
/// Run inside a transaction; the caller commits.
pub async fn soft_delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    deletion: Deletion,
) -> Result<(), DomainError> {
    let row = require(conn, id).await?;
    let images = requests_adapter::images_for(conn, &[id]).await?;

    backups::insert_backup(conn, row, deletion).await?;
    backups::insert_image_backups(conn, &images).await?;
    requests_adapter::delete_images(conn, id).await?;
    requests_adapter::delete(conn, id).await?;
    Ok(())
}

/// Soft-deleted requests, most recently deleted first.
pub async fn list_deleted<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Option<i64>,
) -> Result<Vec<DeletedRequestRecord>, DomainError> {
    let rows = backups::list(conn, user_id).await?;
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut images = group_images(
        backups::images_for(conn, &ids)
            .await?
            .into_iter()
            .map(|img| (img.request_id, img.image_path)),
    );

    rows.into_iter()
        .map(|row| {
            Ok(DeletedRequestRecord {
                status: RequestStatus::from_db(&row.status)?,
                images: images.remove(&row.id).unwrap_or_default(),
                row,
            })
        })
        .collect()
}

/// Put a soft-deleted request back under its original id.
/// Run inside a transaction; the caller commits.
pub async fn restore<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<RequestRecord, DomainError> {
    let backup = backups::find(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::DeletedRequest, "Deleted request not found")
    })?;

    if requests_adapter::find_by_id(conn, id).await?.is_some() {
        return Err(DomainError::conflict(
            ConflictKind::RequestIdConflict,
            "A request with this ID already exists. Cannot restore.",
        ));
    }

    let images: Vec<(i32, String)> = backups::images_for(conn, &[id])
        .await?
        .into_iter()
        .map(|img| (img.image_index, img.image_path))
        .collect();

    requests_adapter::insert_with_id(conn, backups::restored_request(backup)).await?;
    requests_adapter::insert_images(conn, id, &images).await?;
    backups::delete(conn, id).await?;

    load(conn, id).await
}

/// `(backups, live)` row counts.
pub async fn counts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<(u64, u64), DomainError> {
    Ok((backups::count(conn).await?, requests_adapter::count(conn).await?))
}

/// Rewrite legacy status spellings in live and backup rows.
/// Returns `(live rows changed, backup rows changed)`.
pub async fn normalize_legacy_statuses<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<(u64, u64), DomainError> {
    let mut live = 0;
    let mut backed_up = 0;
    for (legacy, status) in LEGACY_SPELLINGS {
        live += requests_adapter::rewrite_status(conn, legacy, status.as_str()).await?;
        backed_up += backups::rewrite_status(conn, legacy, status.as_str()).await?;
    }
    Ok((live, backed_up))
}

/// `(status, count)` pairs for live and backup rows.
pub async fn status_distributions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<(Vec<(String, i64)>, Vec<(String, i64)>), DomainError> {
    Ok((
        requests_adapter::status_distribution(conn).await?,
        backups::status_distribution(conn).await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_spellings_include_legacy_pending() {
        let open = stored_spellings(RequestStatus::is_open);
        assert!(open.contains(&"User Requested tire"));
        assert!(open.contains(&"pending"));
        assert!(open.contains(&"Engineer Approved"));
        assert!(!open.contains(&"complete"));
        assert!(!open.contains(&"order cancelled"));
    }

    #[test]
    fn fulfilled_spellings() {
        let mut done = stored_spellings(RequestStatus::counts_as_fulfilled);
        done.sort_unstable();
        assert_eq!(done, vec!["complete", "order placed"]);
    }

    #[test]
    fn images_group_per_request_in_order() {
        let grouped = group_images(vec![
            (1, "a".to_string()),
            (2, "b".to_string()),
            (1, "c".to_string()),
        ]);
        assert_eq!(grouped[&1], vec!["a", "c"]);
        assert_eq!(grouped[&2], vec!["b"]);
    }
}
