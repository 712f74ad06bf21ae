//! Receipt repository functions.

use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::adapters::receipts_sea as receipts_adapter;
pub use crate::adapters::receipts_sea::{ReceiptCreate, ReceiptUpdate};
use crate::domain::receipt::{receipt_number, RECEIPT_NUMBER_ATTEMPTS};
use crate::entities::receipts;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

fn receipt_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Receipt, "Receipt not found")
}

/// Insert `dto` under numbers from `draw`, drawing again while the unique index
/// on `receipt_number` rejects the insert.
pub async fn insert_with_drawn_number<C, D>(
    conn: &C,
    dto: ReceiptCreate,
    mut draw: D,
) -> Result<receipts::Model, DomainError>
where
    C: ConnectionTrait + Send + Sync,
    D: FnMut() -> String,
{
    for attempt in 1..=RECEIPT_NUMBER_ATTEMPTS {
        let candidate = ReceiptCreate {
            receipt_number: draw(),
            ..dto.clone()
        };
        let number = candidate.receipt_number.clone();
        match receipts_adapter::insert(conn, candidate)
            .await
            .map_err(DomainError::from)
        {
            Err(DomainError::Conflict(ConflictKind::ReceiptNumber, _)) => {
                debug!(attempt, candidate = %number, "receipt number taken, drawing again");
            }
            other => return other,
        }
    }
    Err(DomainError::conflict(
        ConflictKind::ReceiptNumber,
        "Could not allocate a unique receipt number",
    ))
}

/// Insert a receipt. A blank `receipt_number` is replaced with a fresh one;
/// an explicit one must not be taken.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ReceiptCreate,
) -> Result<receipts::Model, DomainError> {
    if dto.receipt_number.trim().is_empty() {
        let date = dto.date_generated.date();
        return insert_with_drawn_number(conn, dto, || receipt_number(date, &mut rand::rng()))
            .await;
    }
    if receipts_adapter::exists_number(conn, &dto.receipt_number).await? {
        return Err(DomainError::conflict(
            ConflictKind::ReceiptNumber,
            "Receipt number already exists",
        ));
    }
    Ok(receipts_adapter::insert(conn, dto).await?)
}

pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<receipts::Model, DomainError> {
    receipts_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(receipt_not_found)
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_officer_id: Option<i64>,
) -> Result<Vec<receipts::Model>, DomainError> {
    Ok(receipts_adapter::list(conn, customer_officer_id).await?)
}

/// Look a receipt up by order number, then by request id when the key is numeric.
pub async fn find_for_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    key: &str,
) -> Result<receipts::Model, DomainError> {
    if let Some(found) = receipts_adapter::find_by_order_number(conn, key).await? {
        return Ok(found);
    }
    match key.trim().parse::<i64>() {
        Ok(request_id) => receipts_adapter::find_by_request_id(conn, request_id)
            .await?
            .ok_or_else(receipt_not_found),
        Err(_) => Err(receipt_not_found()),
    }
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: ReceiptUpdate,
) -> Result<receipts::Model, DomainError> {
    let existing = require(conn, id).await?;
    Ok(receipts_adapter::update(conn, existing, dto).await?)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    let existing = require(conn, id).await?;
    Ok(receipts_adapter::delete(conn, existing).await?)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use super::*;
    use crate::config::db::DbKind;
    use crate::infra::db::bootstrap_db;

    fn receipt(number: &str) -> ReceiptCreate {
        ReceiptCreate {
            receipt_number: number.to_string(),
            request_id: 1,
            order_number: Some("PO-1".into()),
            date_generated: datetime!(2025-01-01 9:00 UTC),
            total_amount: Decimal::new(1000, 0),
            customer_officer_id: None,
            customer_officer_name: None,
            vehicle_number: Some("WP CAB-1234".into()),
            vehicle_brand: None,
            vehicle_model: None,
            supplier_name: None,
            supplier_email: None,
            supplier_phone: None,
            items: "[]".into(),
            notes: None,
            submitted_date: None,
            order_placed_date: None,
        }
    }

    #[tokio::test]
    async fn taken_number_is_redrawn_at_insert() {
        let db = bootstrap_db(DbKind::SqliteMemory).await.unwrap();
        create(&db, receipt("RCP-20250101-1111")).await.unwrap();

        let mut draws = vec!["RCP-20250101-2222", "RCP-20250101-1111"];
        let stored = insert_with_drawn_number(&db, receipt(""), || {
            draws.pop().unwrap().to_string()
        })
        .await
        .unwrap();

        assert_eq!(stored.receipt_number, "RCP-20250101-2222");
        assert!(draws.is_empty());
    }

    #[tokio::test]
    async fn gives_up_after_bounded_draws() {
        let db = bootstrap_db(DbKind::SqliteMemory).await.unwrap();
        create(&db, receipt("RCP-20250101-1111")).await.unwrap();

        let mut calls = 0;
        let err = insert_with_drawn_number(&db, receipt(""), || {
            calls += 1;
            "RCP-20250101-1111".to_string()
        })
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::ReceiptNumber, _)
        ));
        assert_eq!(calls, RECEIPT_NUMBER_ATTEMPTS);
    }

    #[tokio::test]
    async fn explicit_duplicate_is_refused() {
        let db = bootstrap_db(DbKind::SqliteMemory).await.unwrap();
        create(&db, receipt("RCP-20250101-1111")).await.unwrap();
        let err = create(&db, receipt("RCP-20250101-1111")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::ReceiptNumber, _)
        ));
    }
}
