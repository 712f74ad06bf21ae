//! Receipt composition and the receipts catalogue.

use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;
use serde::Deserialize;
use serde_with::rust::double_option;
use serde_with::{serde_as, DisplayFromStr, NoneAsEmptyString, PickFirst};
use time::OffsetDateTime;
use tracing::info;

use crate::domain::receipt::{receipt_items, OrderedTyres, ReceiptItem};
use crate::domain::validation::parse_order_date;
use crate::entities::{receipts, requests};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::receipts::{self as receipts_repo, ReceiptCreate, ReceiptUpdate};
use crate::repos::requests as requests_repo;

/// Supplier fields copied onto a receipt.
#[derive(Debug, Clone, Default)]
pub struct SupplierSnapshot {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

fn encode_items(items: &[ReceiptItem]) -> Result<String, DomainError> {
    serde_json::to_string(items).map_err(|e| {
        DomainError::validation(ValidationKind::Other("items".into()), format!("Invalid receipt items: {e}"))
    })
}

/// Build the receipt for an ordered request. The number is drawn on insert.
pub fn receipt_for_request(
    request: &requests::Model,
    supplier: SupplierSnapshot,
    order_number: Option<String>,
    notes: Option<String>,
    now: OffsetDateTime,
) -> Result<ReceiptCreate, DomainError> {
    let items = receipt_items(&OrderedTyres {
        tire_size_required: request.tire_size_required.clone(),
        quantity: request.quantity,
        tubes_quantity: request.tubes_quantity,
        total_price: request.total_price,
    });

    Ok(ReceiptCreate {
        receipt_number: String::new(),
        request_id: request.id,
        order_number: order_number.or_else(|| request.order_number.clone()),
        date_generated: now,
        total_amount: request.total_price.unwrap_or(Decimal::ZERO),
        customer_officer_id: request.customer_officer_decision_by,
        customer_officer_name: Some(request.requester_name.clone()),
        vehicle_number: Some(request.vehicle_number.clone()),
        vehicle_brand: Some(request.vehicle_brand.clone()),
        vehicle_model: Some(request.vehicle_model.clone()),
        supplier_name: supplier.name,
        supplier_email: supplier.email,
        supplier_phone: supplier.phone,
        items: encode_items(&items)?,
        notes: notes.or_else(|| request.order_notes.clone()),
        submitted_date: Some(request.submitted_at),
        order_placed_date: request.order_placed_date,
    })
}

/// Receipt for a stored request, using whatever order details it carries.
pub async fn generate_for_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request_id: i64,
    now: OffsetDateTime,
) -> Result<receipts::Model, DomainError> {
    let request = requests_repo::require(conn, request_id).await?;
    let supplier = SupplierSnapshot {
        name: request.supplier_name.clone(),
        email: request.supplier_email.clone(),
        phone: request.supplier_phone.clone(),
    };
    let dto = receipt_for_request(&request, supplier, None, None, now)?;
    let receipt = receipts_repo::create(conn, dto).await?;
    info!(request_id, receipt_number = %receipt.receipt_number, "Receipt generated");
    Ok(receipt)
}

/// Body of an explicitly entered receipt.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReceipt {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub request_id: i64,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub customer_officer_id: Option<i64>,
    #[serde(default)]
    pub customer_officer_name: Option<String>,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub vehicle_brand: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub supplier_email: Option<String>,
    #[serde(default)]
    pub supplier_phone: Option<String>,
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub submitted_date: Option<String>,
    #[serde(default)]
    pub order_placed_date: Option<String>,
}

pub async fn create_receipt<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: NewReceipt,
    now: OffsetDateTime,
) -> Result<receipts::Model, DomainError> {
    let parse = |raw: Option<String>| raw.as_deref().map(parse_order_date).transpose();
    let dto = ReceiptCreate {
        receipt_number: String::new(),
        request_id: input.request_id,
        order_number: input.order_number,
        date_generated: now,
        total_amount: input.total_amount.unwrap_or(Decimal::ZERO),
        customer_officer_id: input.customer_officer_id,
        customer_officer_name: input.customer_officer_name,
        vehicle_number: input.vehicle_number,
        vehicle_brand: input.vehicle_brand,
        vehicle_model: input.vehicle_model,
        supplier_name: input.supplier_name,
        supplier_email: input.supplier_email,
        supplier_phone: input.supplier_phone,
        items: encode_items(&input.items)?,
        notes: input.notes,
        submitted_date: parse(input.submitted_date)?,
        order_placed_date: parse(input.order_placed_date)?,
    };
    receipts_repo::create(conn, dto).await
}

/// Editable receipt fields; `null` clears a nullable one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPatch {
    #[serde(default, with = "double_option")]
    pub order_number: Option<Option<String>>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default, with = "double_option")]
    pub customer_officer_name: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub vehicle_number: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub vehicle_brand: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub vehicle_model: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub supplier_name: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub supplier_email: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub supplier_phone: Option<Option<String>>,
    #[serde(default)]
    pub items: Option<Vec<ReceiptItem>>,
    #[serde(default, with = "double_option")]
    pub notes: Option<Option<String>>,
}

pub async fn update_receipt<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    patch: ReceiptPatch,
) -> Result<receipts::Model, DomainError> {
    let items = patch.items.as_deref().map(encode_items).transpose()?;
    let update = ReceiptUpdate {
        order_number: patch.order_number,
        total_amount: patch.total_amount,
        customer_officer_name: patch.customer_officer_name,
        vehicle_number: patch.vehicle_number,
        vehicle_brand: patch.vehicle_brand,
        vehicle_model: patch.vehicle_model,
        supplier_name: patch.supplier_name,
        supplier_email: patch.supplier_email,
        supplier_phone: patch.supplier_phone,
        items,
        notes: patch.notes,
    };
    receipts_repo::update(conn, id, update).await
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::*;

    fn request() -> requests::Model {
        requests::Model {
            id: 11,
            user_id: 1,
            vehicle_id: 2,
            vehicle_number: "CAB-1".into(),
            quantity: 2,
            tubes_quantity: 1,
            tire_size: "195/65R15".into(),
            request_reason: "worn".into(),
            requester_name: "Nimal".into(),
            requester_email: "n@example.lk".into(),
            requester_phone: "771234567".into(),
            vehicle_brand: "Toyota".into(),
            vehicle_model: "Hiace".into(),
            last_replacement_date: date!(2024 - 01 - 01),
            existing_tire_make: "Dunlop".into(),
            tire_size_required: "195/65R15".into(),
            present_km_reading: 50_000,
            previous_km_reading: 10_000,
            tire_wear_pattern: "even".into(),
            comments: None,
            status: "complete".into(),
            submitted_at: datetime!(2025-02-01 08:00 UTC),
            supervisor_notes: None,
            technical_manager_note: None,
            engineer_note: None,
            customer_officer_note: None,
            supervisor_id: None,
            technical_manager_id: None,
            supervisor_decision_by: None,
            engineer_decision_by: None,
            customer_officer_decision_by: Some(21),
            delivery_office_name: None,
            delivery_street_name: None,
            delivery_town: None,
            total_price: Some(Decimal::new(30000, 0)),
            warranty_distance: None,
            tire_wear_indicator_appeared: None,
            user_section: None,
            cost_center: None,
            supplier_name: None,
            supplier_email: None,
            supplier_phone: None,
            order_number: None,
            order_notes: None,
            order_placed_date: None,
        }
    }

    #[test]
    fn receipt_snapshots_request_and_supplier() {
        let dto = receipt_for_request(
            &request(),
            SupplierSnapshot {
                name: Some("Lanka Tyres".into()),
                email: Some("orders@lt.example".into()),
                phone: None,
            },
            Some("PO-9".into()),
            Some("urgent".into()),
            datetime!(2025-02-10 12:00 UTC),
        )
        .unwrap();
        assert!(dto.receipt_number.is_empty());
        assert_eq!(dto.order_number.as_deref(), Some("PO-9"));
        assert_eq!(dto.total_amount, Decimal::new(30000, 0));
        assert_eq!(dto.customer_officer_id, Some(21));
        assert_eq!(dto.customer_officer_name.as_deref(), Some("Nimal"));
        assert_eq!(dto.supplier_name.as_deref(), Some("Lanka Tyres"));
        assert_eq!(dto.notes.as_deref(), Some("urgent"));

        let items: serde_json::Value = serde_json::from_str(&dto.items).unwrap();
        assert_eq!(items[0]["unitPrice"], 15000.0);
        assert_eq!(items[0]["description"], "195/65R15 Tires");
    }
}
