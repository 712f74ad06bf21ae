//! DTOs for requests_sea adapter.

use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

/// Everything a new request row is created from.
#[derive(Debug, Clone)]
pub struct RequestCreate {
    pub user_id: i64,
    pub vehicle_id: i64,
    pub vehicle_number: String,
    pub quantity: i32,
    pub tubes_quantity: i32,
    pub tire_size: String,
    pub request_reason: String,
    pub requester_name: String,
    pub requester_email: String,
    pub requester_phone: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub last_replacement_date: Date,
    pub existing_tire_make: String,
    pub tire_size_required: String,
    pub present_km_reading: i32,
    pub previous_km_reading: i32,
    pub tire_wear_pattern: String,
    pub comments: Option<String>,
    pub status: String,
    pub submitted_at: OffsetDateTime,
    pub supervisor_id: Option<i64>,
    pub delivery_office_name: Option<String>,
    pub delivery_street_name: Option<String>,
    pub delivery_town: Option<String>,
    pub total_price: Option<Decimal>,
    pub warranty_distance: Option<i32>,
    pub tire_wear_indicator_appeared: Option<bool>,
    pub user_section: Option<String>,
    pub cost_center: Option<String>,
}

/// Partial update of the editable request fields.
///
/// Outer `None` leaves a column alone; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct RequestUpdate {
    pub vehicle_number: Option<String>,
    pub quantity: Option<i32>,
    pub tubes_quantity: Option<i32>,
    pub tire_size: Option<String>,
    pub request_reason: Option<String>,
    pub requester_name: Option<String>,
    pub requester_email: Option<String>,
    pub requester_phone: Option<String>,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub last_replacement_date: Option<Date>,
    pub existing_tire_make: Option<String>,
    pub tire_size_required: Option<String>,
    pub present_km_reading: Option<i32>,
    pub previous_km_reading: Option<i32>,
    pub tire_wear_pattern: Option<String>,
    pub comments: Option<Option<String>>,
    pub supervisor_id: Option<Option<i64>>,
    pub technical_manager_id: Option<Option<i64>>,
    pub delivery_office_name: Option<Option<String>>,
    pub delivery_street_name: Option<Option<String>>,
    pub delivery_town: Option<Option<String>>,
    pub total_price: Option<Option<Decimal>>,
    pub warranty_distance: Option<Option<i32>>,
    pub tire_wear_indicator_appeared: Option<Option<bool>>,
    pub user_section: Option<Option<String>>,
    pub cost_center: Option<Option<String>>,
}

/// Column writes for a status change.
#[derive(Debug, Clone)]
pub struct StatusWrite {
    pub status: String,
    pub supervisor_notes: Option<String>,
    pub supervisor_decision_by: Option<i64>,
    pub technical_manager_note: Option<String>,
    pub technical_manager_id: Option<i64>,
    pub engineer_note: Option<String>,
    pub engineer_decision_by: Option<i64>,
    pub customer_officer_note: Option<String>,
    pub customer_officer_decision_by: Option<i64>,
}

impl StatusWrite {
    pub fn status_only(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            supervisor_notes: None,
            supervisor_decision_by: None,
            technical_manager_note: None,
            technical_manager_id: None,
            engineer_note: None,
            engineer_decision_by: None,
            customer_officer_note: None,
            customer_officer_decision_by: None,
        }
    }
}

/// Column writes when an order is placed with a supplier.
#[derive(Debug, Clone)]
pub struct OrderWrite {
    pub status: String,
    pub order_number: String,
    pub order_notes: Option<String>,
    pub order_placed_date: OffsetDateTime,
    pub supplier_name: String,
    pub supplier_email: String,
    pub supplier_phone: Option<String>,
}
