//! Placing a supplier order for a completed request.
//!
//! The order is checked and its email composed first, the email is sent
//! outside any transaction, and only then are the request and receipt written.

use sea_orm::ConnectionTrait;
use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString, PickFirst};
use time::OffsetDateTime;
use tracing::info;

use crate::domain::order_email::{
    compose_order_email, formspree_endpoint, EmailRequest, EmailSupplier, OrderEmail,
};
use crate::domain::status::RequestStatus;
use crate::domain::validation::parse_order_date;
use crate::entities::{receipts, requests, suppliers};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::requests::{self as requests_repo, OrderWrite};
use crate::repos::{receipts as receipts_repo, suppliers as suppliers_repo};
use crate::services::receipts::{receipt_for_request, SupplierSnapshot};

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub order_placed_date: Option<String>,
    #[serde(default)]
    pub order_notes: Option<String>,
}

/// The checked order's fields, before anything touches storage.
#[derive(Debug, Clone)]
pub struct OrderTicket {
    pub supplier_id: i64,
    pub order_number: String,
    pub placed_at: OffsetDateTime,
    pub notes: Option<String>,
}

/// A checked order with its email ready to send.
#[derive(Debug, Clone)]
pub struct PreparedOrder {
    pub ticket: OrderTicket,
    pub request: requests::Model,
    pub supplier: suppliers::Model,
    pub endpoint: String,
    pub email: OrderEmail,
}

fn missing(detail: &str) -> DomainError {
    DomainError::validation(ValidationKind::MissingField, detail)
}

/// Field checks that need no storage, in the order clients see them fail.
pub fn check_order_fields(input: PlaceOrder) -> Result<OrderTicket, DomainError> {
    let order_number = input
        .order_number
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| missing("Order number is required"))?;
    let supplier_id = input
        .supplier_id
        .ok_or_else(|| missing("Supplier ID is required"))?;
    let raw_date = input
        .order_placed_date
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| missing("Order placed date is required"))?;
    let placed_at = parse_order_date(&raw_date)?;

    Ok(OrderTicket {
        supplier_id,
        order_number,
        placed_at,
        notes: input.order_notes,
    })
}

/// Load and check the request and supplier, then compose the email.
pub async fn prepare_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request_id: i64,
    ticket: OrderTicket,
    formspree_base: &str,
) -> Result<PreparedOrder, DomainError> {
    let request = requests_repo::require(conn, request_id).await?;
    let status = RequestStatus::from_db(&request.status)?;
    if status != RequestStatus::Complete {
        return Err(DomainError::validation(
            ValidationKind::RequestNotComplete {
                current_status: status.as_str().to_string(),
            },
            "Request must be complete before placing order",
        ));
    }

    let supplier = suppliers_repo::require(conn, ticket.supplier_id).await?;
    if supplier.formsfree_key.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::SupplierMissingFormKey,
            "Supplier does not have a valid FormsFree key configured",
        ));
    }
    let endpoint = formspree_endpoint(&supplier.formsfree_key, formspree_base)?;

    let email = compose_order_email(
        &EmailSupplier {
            name: supplier.name.clone(),
            email: supplier.email.clone(),
        },
        &EmailRequest {
            id: request.id,
            vehicle_number: request.vehicle_number.clone(),
            tire_size_required: request.tire_size_required.clone(),
            quantity: request.quantity,
            tubes_quantity: request.tubes_quantity,
            delivery_office_name: request.delivery_office_name.clone(),
            delivery_street_name: request.delivery_street_name.clone(),
            delivery_town: request.delivery_town.clone(),
            requester_name: request.requester_name.clone(),
            requester_email: request.requester_email.clone(),
            requester_phone: request.requester_phone.clone(),
            user_section: request.user_section.clone(),
        },
        ticket.notes.as_deref(),
        &ticket.order_number,
    );

    Ok(PreparedOrder {
        ticket,
        request,
        supplier,
        endpoint,
        email,
    })
}

/// Mark the request ordered and write its receipt. Run inside one transaction.
pub async fn record_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order: &PreparedOrder,
    now: OffsetDateTime,
) -> Result<receipts::Model, DomainError> {
    let ticket = &order.ticket;
    let current = requests_repo::require(conn, order.request.id).await?;
    // Another order may have landed while the email was in flight.
    let status = RequestStatus::from_db(&current.status)?;
    if status != RequestStatus::Complete {
        return Err(DomainError::validation(
            ValidationKind::RequestNotComplete {
                current_status: status.as_str().to_string(),
            },
            "Request must be complete before placing order",
        ));
    }
    let updated = requests_repo::write_order(
        conn,
        current,
        OrderWrite {
            status: RequestStatus::OrderPlaced.as_str().to_string(),
            order_number: ticket.order_number.clone(),
            order_notes: ticket.notes.clone(),
            order_placed_date: ticket.placed_at,
            supplier_name: order.supplier.name.clone(),
            supplier_email: order.supplier.email.clone(),
            supplier_phone: order.supplier.phone.clone(),
        },
    )
    .await?;

    let dto = receipt_for_request(
        &updated,
        SupplierSnapshot {
            name: Some(order.supplier.name.clone()),
            email: Some(order.supplier.email.clone()),
            phone: order.supplier.phone.clone(),
        },
        Some(ticket.order_number.clone()),
        ticket.notes.clone(),
        now,
    )?;
    let receipt = receipts_repo::create(conn, dto).await?;

    info!(
        request_id = updated.id,
        supplier_id = order.supplier.id,
        order_number = %ticket.order_number,
        receipt_number = %receipt.receipt_number,
        "Order placed"
    );
    Ok(receipt)
}
