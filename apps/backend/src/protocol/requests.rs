//! Request payloads as the frontend reads them.
//!
//! Keys are camelCase except the per-stage note and decider columns, which the
//! client has always read in their column spelling.

use serde::Serialize;

use super::{money, opt_timestamp, timestamp};
use crate::domain::eligibility::{format_timestamp, Eligibility};
use crate::domain::status::RequestStatus;
use crate::repos::requests::{DeletedRequestRecord, RequestRecord};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    pub id: i64,
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
    pub last_replacement_date: String,
    pub existing_tire_make: String,
    pub tire_size_required: String,
    pub present_km_reading: i32,
    pub previous_km_reading: i32,
    pub tire_wear_pattern: String,
    pub comments: Option<String>,
    pub status: RequestStatus,
    pub submitted_at: String,
    #[serde(rename = "supervisor_notes")]
    pub supervisor_notes: Option<String>,
    #[serde(rename = "technical_manager_note")]
    pub technical_manager_note: Option<String>,
    #[serde(rename = "engineer_note")]
    pub engineer_note: Option<String>,
    #[serde(rename = "customer_officer_note")]
    pub customer_officer_note: Option<String>,
    pub supervisor_id: Option<i64>,
    #[serde(rename = "technical_manager_id")]
    pub technical_manager_id: Option<i64>,
    #[serde(rename = "supervisor_decision_by")]
    pub supervisor_decision_by: Option<i64>,
    #[serde(rename = "engineer_decision_by")]
    pub engineer_decision_by: Option<i64>,
    #[serde(rename = "customer_officer_decision_by")]
    pub customer_officer_decision_by: Option<i64>,
    pub delivery_office_name: Option<String>,
    pub delivery_street_name: Option<String>,
    pub delivery_town: Option<String>,
    pub total_price: Option<f64>,
    pub warranty_distance: Option<i32>,
    pub tire_wear_indicator_appeared: Option<bool>,
    pub user_section: Option<String>,
    pub cost_center: Option<String>,
    pub supplier_name: Option<String>,
    pub supplier_email: Option<String>,
    pub supplier_phone: Option<String>,
    pub order_number: Option<String>,
    pub order_notes: Option<String>,
    pub order_placed_date: Option<String>,
    pub images: Vec<String>,
}

impl From<RequestRecord> for RequestView {
    fn from(rec: RequestRecord) -> Self {
        let r = rec.row;
        Self {
            id: r.id,
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            vehicle_number: r.vehicle_number,
            quantity: r.quantity,
            tubes_quantity: r.tubes_quantity,
            tire_size: r.tire_size,
            request_reason: r.request_reason,
            requester_name: r.requester_name,
            requester_email: r.requester_email,
            requester_phone: r.requester_phone,
            vehicle_brand: r.vehicle_brand,
            vehicle_model: r.vehicle_model,
            last_replacement_date: r.last_replacement_date.to_string(),
            existing_tire_make: r.existing_tire_make,
            tire_size_required: r.tire_size_required,
            present_km_reading: r.present_km_reading,
            previous_km_reading: r.previous_km_reading,
            tire_wear_pattern: r.tire_wear_pattern,
            comments: r.comments,
            status: rec.status,
            submitted_at: timestamp(r.submitted_at),
            supervisor_notes: r.supervisor_notes,
            technical_manager_note: r.technical_manager_note,
            engineer_note: r.engineer_note,
            customer_officer_note: r.customer_officer_note,
            supervisor_id: r.supervisor_id,
            technical_manager_id: r.technical_manager_id,
            supervisor_decision_by: r.supervisor_decision_by,
            engineer_decision_by: r.engineer_decision_by,
            customer_officer_decision_by: r.customer_officer_decision_by,
            delivery_office_name: r.delivery_office_name,
            delivery_street_name: r.delivery_street_name,
            delivery_town: r.delivery_town,
            total_price: r.total_price.map(money),
            warranty_distance: r.warranty_distance,
            tire_wear_indicator_appeared: r.tire_wear_indicator_appeared,
            user_section: r.user_section,
            cost_center: r.cost_center,
            supplier_name: r.supplier_name,
            supplier_email: r.supplier_email,
            supplier_phone: r.supplier_phone,
            order_number: r.order_number,
            order_notes: r.order_notes,
            order_placed_date: opt_timestamp(r.order_placed_date),
            images: rec.images,
        }
    }
}

/// A soft-deleted request: the live shape plus who deleted it and when.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedRequestView {
    #[serde(flatten)]
    pub request: RequestView,
    pub deleted_at: String,
    pub deleted_by: Option<i64>,
    pub deleted_by_role: Option<String>,
}

impl From<DeletedRequestRecord> for DeletedRequestView {
    fn from(rec: DeletedRequestRecord) -> Self {
        let deleted_at = timestamp(rec.row.deleted_at);
        let deleted_by = rec.row.deleted_by;
        let deleted_by_role = rec.row.deleted_by_role.clone();
        let live = RequestRecord {
            row: crate::adapters::requests_sea::backups::restored_request(rec.row),
            status: rec.status,
            images: rec.images,
        };
        Self {
            request: live.into(),
            deleted_at,
            deleted_by,
            deleted_by_role,
        }
    }
}

/// Answer to "may this vehicle file a new request?".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionView {
    pub restricted: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_request_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_request_status: Option<RequestStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_request_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

impl RestrictionView {
    pub fn new(eligibility: &Eligibility, vehicle_number: &str) -> Self {
        let message = eligibility.message(vehicle_number);
        let mut view = Self {
            restricted: !eligibility.is_eligible(),
            kind: None,
            message,
            existing_request_id: None,
            existing_request_status: None,
            last_request_date: None,
            days_remaining: None,
        };
        match eligibility {
            Eligibility::Eligible => {}
            Eligibility::Pending {
                existing_request_id,
                existing_status,
            } => {
                view.kind = Some("pending");
                view.existing_request_id = Some(*existing_request_id);
                view.existing_request_status = Some(*existing_status);
            }
            Eligibility::Recent {
                last_request_date,
                days_remaining,
                ..
            } => {
                view.kind = Some("recent");
                view.last_request_date = Some(format_timestamp(*last_request_date));
                view.days_remaining = Some(*days_remaining);
            }
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn restriction_shapes() {
        let open = serde_json::to_value(RestrictionView::new(&Eligibility::Eligible, "CAB-1")).unwrap();
        assert_eq!(open["restricted"], false);
        assert!(open.get("type").is_none());

        let pending = serde_json::to_value(RestrictionView::new(
            &Eligibility::Pending {
                existing_request_id: 12,
                existing_status: RequestStatus::SupervisorApproved,
            },
            "CAB-1",
        ))
        .unwrap();
        assert_eq!(pending["type"], "pending");
        assert_eq!(pending["existingRequestId"], 12);
        assert_eq!(pending["existingRequestStatus"], "supervisor approved");

        let recent = serde_json::to_value(RestrictionView::new(
            &Eligibility::Recent {
                last_request_date: datetime!(2025-06-01 10:00 UTC),
                days_since: 5,
                days_remaining: 25,
            },
            "CAB-1",
        ))
        .unwrap();
        assert_eq!(recent["type"], "recent");
        assert_eq!(recent["lastRequestDate"], "2025-06-01T10:00:00Z");
        assert_eq!(recent["daysRemaining"], 25);
    }
}
