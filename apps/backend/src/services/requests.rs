//! Tyre request workflow: filing, editing, status decisions, soft delete.

use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;
use serde::Deserialize;
use serde_with::rust::double_option;
use serde_with::{serde_as, DisplayFromStr, NoneAsEmptyString, PickFirst};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::domain::eligibility::{evaluate, Eligibility};
use crate::domain::status::{DecisionStage, RequestStatus};
use crate::domain::validation::{
    parse_calendar_date, require_fields, validate_count, validate_phone,
};
use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::repos::requests::{
    self as requests_repo, DeletedRequestRecord, Deletion, RequestCreate, RequestRecord,
    RequestUpdate, StatusWrite,
};

/// Body of a new request. Numbers may arrive as JSON numbers or numeric strings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub vehicle_id: Option<i64>,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub tubes_quantity: Option<i32>,
    #[serde(default)]
    pub tire_size: Option<String>,
    #[serde(default)]
    pub request_reason: Option<String>,
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub requester_email: Option<String>,
    #[serde(default)]
    pub requester_phone: Option<String>,
    #[serde(default)]
    pub vehicle_brand: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub last_replacement_date: Option<String>,
    #[serde(default)]
    pub existing_tire_make: Option<String>,
    #[serde(default)]
    pub tire_size_required: Option<String>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub present_km_reading: Option<i32>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub previous_km_reading: Option<i32>,
    #[serde(default)]
    pub tire_wear_pattern: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub user_section: Option<String>,
    #[serde(default)]
    pub cost_center: Option<String>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub supervisor_id: Option<i64>,
    #[serde(default)]
    pub delivery_office_name: Option<String>,
    #[serde(default)]
    pub delivery_street_name: Option<String>,
    #[serde(default)]
    pub delivery_town: Option<String>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub warranty_distance: Option<i32>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub tire_wear_indicator_appeared: Option<bool>,
    /// Image URLs; the position is kept as the image index and blanks are skipped
    #[serde(default)]
    pub images: Vec<Option<String>>,
}

fn filled(v: &Option<String>) -> bool {
    v.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl NewRequest {
    fn is_present(&self, field: &str) -> bool {
        match field {
            "userId" => self.user_id.is_some(),
            "vehicleId" => self.vehicle_id.is_some(),
            "vehicleNumber" => filled(&self.vehicle_number),
            "quantity" => self.quantity.is_some(),
            "tubesQuantity" => self.tubes_quantity.is_some(),
            "tireSize" => filled(&self.tire_size),
            "requestReason" => filled(&self.request_reason),
            "requesterName" => filled(&self.requester_name),
            "requesterEmail" => filled(&self.requester_email),
            "requesterPhone" => filled(&self.requester_phone),
            "vehicleBrand" => filled(&self.vehicle_brand),
            "vehicleModel" => filled(&self.vehicle_model),
            "lastReplacementDate" => filled(&self.last_replacement_date),
            "existingTireMake" => filled(&self.existing_tire_make),
            "tireSizeRequired" => filled(&self.tire_size_required),
            "presentKmReading" => self.present_km_reading.is_some(),
            "previousKmReading" => self.previous_km_reading.is_some(),
            "tireWearPattern" => filled(&self.tire_wear_pattern),
            "userSection" => filled(&self.user_section),
            "costCenter" => filled(&self.cost_center),
            _ => true,
        }
    }

    fn image_pairs(&self) -> Vec<(i32, String)> {
        self.images
            .iter()
            .enumerate()
            .filter_map(|(i, url)| {
                let url = url.as_deref()?.trim();
                (!url.is_empty()).then(|| (i as i32, url.to_string()))
            })
            .collect()
    }
}

/// Partial edit of a request. `null` clears a nullable column.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPatch {
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub tubes_quantity: Option<i32>,
    #[serde(default)]
    pub tire_size: Option<String>,
    #[serde(default)]
    pub request_reason: Option<String>,
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub requester_email: Option<String>,
    #[serde(default)]
    pub requester_phone: Option<String>,
    #[serde(default)]
    pub vehicle_brand: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub last_replacement_date: Option<String>,
    #[serde(default)]
    pub existing_tire_make: Option<String>,
    #[serde(default)]
    pub tire_size_required: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub present_km_reading: Option<i32>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub previous_km_reading: Option<i32>,
    #[serde(default)]
    pub tire_wear_pattern: Option<String>,
    #[serde(default, with = "double_option")]
    pub comments: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub supervisor_id: Option<Option<i64>>,
    #[serde(default, rename = "technical_manager_id", with = "double_option")]
    pub technical_manager_id: Option<Option<i64>>,
    #[serde(default, with = "double_option")]
    pub delivery_office_name: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub delivery_street_name: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub delivery_town: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub total_price: Option<Option<Decimal>>,
    #[serde(default, with = "double_option")]
    pub warranty_distance: Option<Option<i32>>,
    #[serde(default, with = "double_option")]
    pub tire_wear_indicator_appeared: Option<Option<bool>>,
    #[serde(default, with = "double_option")]
    pub user_section: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub cost_center: Option<Option<String>>,
}

impl RequestPatch {
    fn into_update(self) -> Result<RequestUpdate, DomainError> {
        let requester_phone = self
            .requester_phone
            .as_deref()
            .map(validate_phone)
            .transpose()?;
        let last_replacement_date = self
            .last_replacement_date
            .as_deref()
            .map(|raw| parse_calendar_date("lastReplacementDate", raw))
            .transpose()?;
        let quantity = self
            .quantity
            .map(|n| validate_count("quantity", n))
            .transpose()?;
        let tubes_quantity = self
            .tubes_quantity
            .map(|n| validate_count("tubesQuantity", n))
            .transpose()?;

        Ok(RequestUpdate {
            vehicle_number: self.vehicle_number,
            quantity,
            tubes_quantity,
            tire_size: self.tire_size,
            request_reason: self.request_reason,
            requester_name: self.requester_name,
            requester_email: self.requester_email,
            requester_phone,
            vehicle_brand: self.vehicle_brand,
            vehicle_model: self.vehicle_model,
            last_replacement_date,
            existing_tire_make: self.existing_tire_make,
            tire_size_required: self.tire_size_required,
            present_km_reading: self.present_km_reading,
            previous_km_reading: self.previous_km_reading,
            tire_wear_pattern: self.tire_wear_pattern,
            comments: self.comments,
            supervisor_id: self.supervisor_id,
            technical_manager_id: self.technical_manager_id,
            delivery_office_name: self.delivery_office_name,
            delivery_street_name: self.delivery_street_name,
            delivery_town: self.delivery_town,
            total_price: self.total_price,
            warranty_distance: self.warranty_distance,
            tire_wear_indicator_appeared: self.tire_wear_indicator_appeared,
            user_section: self.user_section,
            cost_center: self.cost_center,
        })
    }
}

/// A stage decision: the new status plus the note and decider it records.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Map a status change onto the stage columns it writes.
pub fn status_write(
    status: RequestStatus,
    notes: Option<String>,
    decided_by: Option<i64>,
) -> StatusWrite {
    let mut write = StatusWrite::status_only(status.as_str());
    match status.decision_stage() {
        Some(DecisionStage::Supervisor) => {
            write.supervisor_notes = notes;
            write.supervisor_decision_by = decided_by;
        }
        Some(DecisionStage::TechnicalManager) => {
            write.technical_manager_note = notes;
            write.technical_manager_id = decided_by;
        }
        Some(DecisionStage::Engineer) => {
            write.engineer_note = notes;
            write.engineer_decision_by = decided_by;
        }
        Some(DecisionStage::CustomerOfficer) => {
            write.customer_officer_note = notes;
            write.customer_officer_decision_by = decided_by;
        }
        None => {}
    }
    write
}

pub async fn eligibility<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    vehicle_number: &str,
    now: OffsetDateTime,
) -> Result<Eligibility, DomainError> {
    let (open, fulfilled) = requests_repo::eligibility_facts(conn, vehicle_number, now).await?;
    Ok(evaluate(&open, &fulfilled, now))
}

/// Validate and file a new request for a vehicle.
pub async fn create_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: NewRequest,
    now: OffsetDateTime,
) -> Result<RequestRecord, DomainError> {
    require_fields(|field| input.is_present(field))?;
    let quantity = validate_count("quantity", input.quantity.unwrap_or_default())?;
    let tubes_quantity = validate_count("tubesQuantity", input.tubes_quantity.unwrap_or_default())?;
    let requester_phone = validate_phone(input.requester_phone.as_deref().unwrap_or_default())?;
    let last_replacement_date = parse_calendar_date(
        "lastReplacementDate",
        input.last_replacement_date.as_deref().unwrap_or_default(),
    )?;

    let vehicle_number = input.vehicle_number.clone().unwrap_or_default();
    if let Some(rejection) = eligibility(conn, &vehicle_number, now)
        .await?
        .into_error(&vehicle_number)
    {
        info!(vehicle_number = %vehicle_number, "Request refused by vehicle eligibility");
        return Err(rejection);
    }

    let images = input.image_pairs();
    let dto = RequestCreate {
        user_id: input.user_id.unwrap_or_default(),
        vehicle_id: input.vehicle_id.unwrap_or_default(),
        vehicle_number,
        quantity,
        tubes_quantity,
        tire_size: input.tire_size.unwrap_or_default(),
        request_reason: input.request_reason.unwrap_or_default(),
        requester_name: input.requester_name.unwrap_or_default(),
        requester_email: input.requester_email.unwrap_or_default(),
        requester_phone,
        vehicle_brand: input.vehicle_brand.unwrap_or_default(),
        vehicle_model: input.vehicle_model.unwrap_or_default(),
        last_replacement_date,
        existing_tire_make: input.existing_tire_make.unwrap_or_default(),
        tire_size_required: input.tire_size_required.unwrap_or_default(),
        present_km_reading: input.present_km_reading.unwrap_or_default(),
        previous_km_reading: input.previous_km_reading.unwrap_or_default(),
        tire_wear_pattern: input.tire_wear_pattern.unwrap_or_default(),
        comments: input.comments,
        status: RequestStatus::UserRequested.as_str().to_string(),
        submitted_at: now,
        supervisor_id: input.supervisor_id,
        delivery_office_name: input.delivery_office_name,
        delivery_street_name: input.delivery_street_name,
        delivery_town: input.delivery_town,
        total_price: input.total_price,
        warranty_distance: input.warranty_distance,
        tire_wear_indicator_appeared: input.tire_wear_indicator_appeared,
        user_section: input.user_section,
        cost_center: input.cost_center,
    };

    let record = requests_repo::create(conn, dto, images).await?;
    info!(
        request_id = record.row.id,
        vehicle_number = %record.row.vehicle_number,
        requester = %Redacted(&record.row.requester_email),
        images = record.images.len(),
        "Tyre request filed"
    );
    Ok(record)
}

pub async fn update_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    patch: RequestPatch,
) -> Result<RequestRecord, DomainError> {
    let update = patch.into_update()?;
    requests_repo::update_fields(conn, id, update).await
}

pub async fn change_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    change: StatusChange,
) -> Result<RequestRecord, DomainError> {
    let status = RequestStatus::parse(&change.status)?;
    let write = status_write(status, change.notes, change.user_id);
    let record = requests_repo::write_status(conn, id, write).await?;
    info!(
        request_id = id,
        status = %status,
        role = change.role.as_deref().unwrap_or("unspecified"),
        decided_by = change.user_id,
        "Request status changed"
    );
    Ok(record)
}

/// Who asked for a soft delete.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteActor {
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub role: Option<String>,
}

pub async fn soft_delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    actor: DeleteActor,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    requests_repo::soft_delete(
        conn,
        id,
        Deletion {
            deleted_at: now,
            deleted_by: actor.user_id,
            deleted_by_role: actor.role,
        },
    )
    .await?;
    info!(request_id = id, deleted_by = actor.user_id, "Request moved to backups");
    Ok(())
}

pub async fn restore<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<RequestRecord, DomainError> {
    let record = requests_repo::restore(conn, id).await.inspect_err(|e| {
        warn!(request_id = id, error = %e, "Restore refused");
    })?;
    info!(request_id = id, "Request restored from backups");
    Ok(record)
}

pub async fn list_deleted<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Option<i64>,
) -> Result<Vec<DeletedRequestRecord>, DomainError> {
    requests_repo::list_deleted(conn, user_id).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::domain::ValidationKind;

    #[test]
    fn stage_columns_follow_status() {
        let w = status_write(RequestStatus::TechnicalManagerRejected, Some("worn".into()), Some(8));
        assert_eq!(w.status, "technical-manager rejected");
        assert_eq!(w.technical_manager_note.as_deref(), Some("worn"));
        assert_eq!(w.technical_manager_id, Some(8));
        assert!(w.supervisor_notes.is_none());

        let w = status_write(RequestStatus::Complete, Some("fitted".into()), None);
        assert_eq!(w.engineer_note.as_deref(), Some("fitted"));
        assert_eq!(w.engineer_decision_by, None);

        let w = status_write(RequestStatus::Approved, Some("ignored".into()), Some(1));
        assert!(w.supervisor_notes.is_none());
        assert!(w.customer_officer_note.is_none());
        assert!(w.customer_officer_decision_by.is_none());
    }

    #[test]
    fn new_request_accepts_string_numbers_and_keeps_image_positions() {
        let input: NewRequest = serde_json::from_value(json!({
            "userId": "4",
            "vehicleId": 2,
            "quantity": "",
            "totalPrice": "1500.50",
            "images": ["a.jpg", "", null, "d.jpg"]
        }))
        .unwrap();
        assert_eq!(input.user_id, Some(4));
        assert_eq!(input.vehicle_id, Some(2));
        assert_eq!(input.quantity, None);
        assert_eq!(input.total_price, Some(Decimal::new(150050, 2)));
        assert_eq!(
            input.image_pairs(),
            vec![(0, "a.jpg".to_string()), (3, "d.jpg".to_string())]
        );
        assert!(!input.is_present("quantity"));
        assert!(!input.is_present("vehicleNumber"));
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let patch: RequestPatch = serde_json::from_value(json!({
            "comments": null,
            "deliveryTown": "Kandy",
            "quantity": "3"
        }))
        .unwrap();
        let update = patch.into_update().unwrap();
        assert_eq!(update.comments, Some(None));
        assert_eq!(update.delivery_town, Some(Some("Kandy".into())));
        assert_eq!(update.delivery_office_name, None);
        assert_eq!(update.quantity, Some(3));
    }

    #[test]
    fn patch_validates_phone() {
        let patch = RequestPatch {
            requester_phone: Some("0771234567".into()),
            ..Default::default()
        };
        assert!(patch.into_update().is_err());
    }

    #[test]
    fn patch_rejects_negative_counts() {
        let patch = RequestPatch {
            tubes_quantity: Some(-2),
            ..Default::default()
        };
        assert!(matches!(
            patch.into_update().unwrap_err(),
            DomainError::Validation(ValidationKind::Other(_), _)
        ));
    }
}
