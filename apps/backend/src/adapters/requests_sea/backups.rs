//! Soft-delete storage: request and image copies kept for restore.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::{request_backups, request_image_backups, request_images, requests};

/// Who removed a request and when.
#[derive(Debug, Clone)]
pub struct Deletion {
    pub deleted_at: OffsetDateTime,
    pub deleted_by: Option<i64>,
    pub deleted_by_role: Option<String>,
}

fn backup_row(r: requests::Model, deletion: Deletion) -> request_backups::ActiveModel {
    request_backups::ActiveModel {
        id: Set(r.id),
        user_id: Set(r.user_id),
        vehicle_id: Set(r.vehicle_id),
        vehicle_number: Set(r.vehicle_number),
        quantity: Set(r.quantity),
        tubes_quantity: Set(r.tubes_quantity),
        tire_size: Set(r.tire_size),
        request_reason: Set(r.request_reason),
        requester_name: Set(r.requester_name),
        requester_email: Set(r.requester_email),
        requester_phone: Set(r.requester_phone),
        vehicle_brand: Set(r.vehicle_brand),
        vehicle_model: Set(r.vehicle_model),
        last_replacement_date: Set(r.last_replacement_date),
        existing_tire_make: Set(r.existing_tire_make),
        tire_size_required: Set(r.tire_size_required),
        present_km_reading: Set(r.present_km_reading),
        previous_km_reading: Set(r.previous_km_reading),
        tire_wear_pattern: Set(r.tire_wear_pattern),
        comments: Set(r.comments),
        status: Set(r.status),
        submitted_at: Set(r.submitted_at),
        supervisor_notes: Set(r.supervisor_notes),
        technical_manager_note: Set(r.technical_manager_note),
        engineer_note: Set(r.engineer_note),
        customer_officer_note: Set(r.customer_officer_note),
        supervisor_id: Set(r.supervisor_id),
        technical_manager_id: Set(r.technical_manager_id),
        supervisor_decision_by: Set(r.supervisor_decision_by),
        engineer_decision_by: Set(r.engineer_decision_by),
        customer_officer_decision_by: Set(r.customer_officer_decision_by),
        delivery_office_name: Set(r.delivery_office_name),
        delivery_street_name: Set(r.delivery_street_name),
        delivery_town: Set(r.delivery_town),
        total_price: Set(r.total_price),
        warranty_distance: Set(r.warranty_distance),
        tire_wear_indicator_appeared: Set(r.tire_wear_indicator_appeared),
        user_section: Set(r.user_section),
        cost_center: Set(r.cost_center),
        supplier_name: Set(r.supplier_name),
        supplier_email: Set(r.supplier_email),
        supplier_phone: Set(r.supplier_phone),
        order_number: Set(r.order_number),
        order_notes: Set(r.order_notes),
        order_placed_date: Set(r.order_placed_date),
        deleted_at: Set(deletion.deleted_at),
        deleted_by: Set(deletion.deleted_by),
        deleted_by_role: Set(deletion.deleted_by_role),
    }
}

/// The live request a backup restores to, id included.
pub fn restored_request(b: request_backups::Model) -> requests::Model {
    requests::Model {
        id: b.id,
        user_id: b.user_id,
        vehicle_id: b.vehicle_id,
        vehicle_number: b.vehicle_number,
        quantity: b.quantity,
        tubes_quantity: b.tubes_quantity,
        tire_size: b.tire_size,
        request_reason: b.request_reason,
        requester_name: b.requester_name,
        requester_email: b.requester_email,
        requester_phone: b.requester_phone,
        vehicle_brand: b.vehicle_brand,
        vehicle_model: b.vehicle_model,
        last_replacement_date: b.last_replacement_date,
        existing_tire_make: b.existing_tire_make,
        tire_size_required: b.tire_size_required,
        present_km_reading: b.present_km_reading,
        previous_km_reading: b.previous_km_reading,
        tire_wear_pattern: b.tire_wear_pattern,
        comments: b.comments,
        status: b.status,
        submitted_at: b.submitted_at,
        supervisor_notes: b.supervisor_notes,
        technical_manager_note: b.technical_manager_note,
        engineer_note: b.engineer_note,
        customer_officer_note: b.customer_officer_note,
        supervisor_id: b.supervisor_id,
        technical_manager_id: b.technical_manager_id,
        supervisor_decision_by: b.supervisor_decision_by,
        engineer_decision_by: b.engineer_decision_by,
        customer_officer_decision_by: b.customer_officer_decision_by,
        delivery_office_name: b.delivery_office_name,
        delivery_street_name: b.delivery_street_name,
        delivery_town: b.delivery_town,
        total_price: b.total_price,
        warranty_distance: b.warranty_distance,
        tire_wear_indicator_appeared: b.tire_wear_indicator_appeared,
        user_section: b.user_section,
        cost_center: b.cost_center,
        supplier_name: b.supplier_name,
        supplier_email: b.supplier_email,
        supplier_phone: b.supplier_phone,
        order_number: b.order_number,
        order_notes: b.order_notes,
        order_placed_date: b.order_placed_date,
    }
}

pub async fn insert_backup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request: requests::Model,
    deletion: Deletion,
) -> Result<(), sea_orm::DbErr> {
    request_backups::Entity::insert(backup_row(request, deletion))
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn insert_image_backups<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    images: &[request_images::Model],
) -> Result<(), sea_orm::DbErr> {
    if images.is_empty() {
        return Ok(());
    }
    let rows = images.iter().map(|img| request_image_backups::ActiveModel {
        id: NotSet,
        request_id: Set(img.request_id),
        image_path: Set(img.image_path.clone()),
        image_index: Set(img.image_index),
    });
    request_image_backups::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<request_backups::Model>, sea_orm::DbErr> {
    request_backups::Entity::find_by_id(id).one(conn).await
}

/// All backups, most recently deleted first.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Option<i64>,
) -> Result<Vec<request_backups::Model>, sea_orm::DbErr> {
    let mut query = request_backups::Entity::find();
    if let Some(user_id) = user_id {
        query = query.filter(request_backups::Column::UserId.eq(user_id));
    }
    query
        .order_by_desc(request_backups::Column::DeletedAt)
        .order_by_desc(request_backups::Column::Id)
        .all(conn)
        .await
}

pub async fn images_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request_ids: &[i64],
) -> Result<Vec<request_image_backups::Model>, sea_orm::DbErr> {
    if request_ids.is_empty() {
        return Ok(Vec::new());
    }
    request_image_backups::Entity::find()
        .filter(request_image_backups::Column::RequestId.is_in(request_ids.iter().copied()))
        .order_by_asc(request_image_backups::Column::RequestId)
        .order_by_asc(request_image_backups::Column::ImageIndex)
        .all(conn)
        .await
}

/// Drop a backup and its image copies.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), sea_orm::DbErr> {
    request_image_backups::Entity::delete_many()
        .filter(request_image_backups::Column::RequestId.eq(id))
        .exec(conn)
        .await?;
    request_backups::Entity::delete_by_id(id).exec(conn).await?;
    Ok(())
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    request_backups::Entity::find().count(conn).await
}

pub async fn rewrite_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    from: &str,
    to: &str,
) -> Result<u64, sea_orm::DbErr> {
    let res = request_backups::Entity::update_many()
        .col_expr(request_backups::Column::Status, Expr::value(to))
        .filter(request_backups::Column::Status.eq(from))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn status_distribution<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(String, i64)>, sea_orm::DbErr> {
    request_backups::Entity::find()
        .select_only()
        .column(request_backups::Column::Status)
        .column_as(Expr::col(request_backups::Column::Id).count(), "count")
        .group_by(request_backups::Column::Status)
        .order_by_asc(request_backups::Column::Status)
        .into_tuple::<(String, i64)>()
        .all(conn)
        .await
}
