//! Receipt payloads.

use serde::Serialize;
use serde_json::Value;

use super::{money, opt_timestamp, timestamp};
use crate::domain::receipt::{CompanyDetails, COMPANY};
use crate::entities::receipts;

/// Stored items are JSON text; anything unreadable shows as no items.
fn parse_items(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(v @ Value::Array(_)) => v,
        _ => Value::Array(Vec::new()),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptView {
    pub id: i64,
    pub receipt_number: String,
    pub request_id: i64,
    pub order_number: Option<String>,
    pub date_generated: String,
    pub total_amount: f64,
    pub customer_officer_id: Option<i64>,
    pub customer_officer_name: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub supplier_name: Option<String>,
    pub supplier_email: Option<String>,
    pub supplier_phone: Option<String>,
    pub items: Value,
    pub notes: Option<String>,
    pub submitted_date: Option<String>,
    pub order_placed_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<receipts::Model> for ReceiptView {
    fn from(r: receipts::Model) -> Self {
        Self {
            id: r.id,
            items: parse_items(&r.items),
            receipt_number: r.receipt_number,
            request_id: r.request_id,
            order_number: r.order_number,
            date_generated: timestamp(r.date_generated),
            total_amount: money(r.total_amount),
            customer_officer_id: r.customer_officer_id,
            customer_officer_name: r.customer_officer_name,
            vehicle_number: r.vehicle_number,
            vehicle_brand: r.vehicle_brand,
            vehicle_model: r.vehicle_model,
            supplier_name: r.supplier_name,
            supplier_email: r.supplier_email,
            supplier_phone: r.supplier_phone,
            notes: r.notes,
            submitted_date: opt_timestamp(r.submitted_date),
            order_placed_date: opt_timestamp(r.order_placed_date),
            created_at: timestamp(r.created_at),
            updated_at: timestamp(r.updated_at),
        }
    }
}

/// Printable receipt: blanks instead of nulls, plus the issuer block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedReceipt {
    pub id: String,
    pub order_id: String,
    pub request_id: i64,
    pub receipt_number: String,
    pub date_generated: String,
    pub total_amount: f64,
    pub customer_officer_id: String,
    pub customer_officer_name: String,
    pub vehicle_number: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub supplier_name: String,
    pub supplier_email: String,
    pub supplier_phone: String,
    pub items: Value,
    pub submitted_date: Option<String>,
    pub order_placed_date: Option<String>,
    pub order_number: String,
    pub notes: String,
    pub company_details: CompanyDetails,
}

impl From<receipts::Model> for FormattedReceipt {
    fn from(r: receipts::Model) -> Self {
        let order_number = r.order_number.unwrap_or_default();
        Self {
            id: r.id.to_string(),
            order_id: if order_number.is_empty() {
                r.request_id.to_string()
            } else {
                order_number.clone()
            },
            request_id: r.request_id,
            items: parse_items(&r.items),
            receipt_number: r.receipt_number,
            date_generated: timestamp(r.date_generated),
            total_amount: money(r.total_amount),
            customer_officer_id: r
                .customer_officer_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            customer_officer_name: r.customer_officer_name.unwrap_or_default(),
            vehicle_number: r.vehicle_number.unwrap_or_default(),
            vehicle_brand: r.vehicle_brand.unwrap_or_default(),
            vehicle_model: r.vehicle_model.unwrap_or_default(),
            supplier_name: r.supplier_name.unwrap_or_default(),
            supplier_email: r.supplier_email.unwrap_or_default(),
            supplier_phone: r.supplier_phone.unwrap_or_default(),
            submitted_date: opt_timestamp(r.submitted_date),
            order_placed_date: opt_timestamp(r.order_placed_date),
            order_number,
            notes: r.notes.unwrap_or_default(),
            company_details: COMPANY,
        }
    }
}
