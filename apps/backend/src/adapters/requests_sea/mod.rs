//! SeaORM adapter for live requests and their images.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::{request_images, requests};

pub mod backups;
pub mod dto;

pub use dto::{OrderWrite, RequestCreate, RequestUpdate, StatusWrite};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RequestCreate,
) -> Result<requests::Model, sea_orm::DbErr> {
    requests::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        vehicle_id: Set(dto.vehicle_id),
        vehicle_number: Set(dto.vehicle_number),
        quantity: Set(dto.quantity),
        tubes_quantity: Set(dto.tubes_quantity),
        tire_size: Set(dto.tire_size),
        request_reason: Set(dto.request_reason),
        requester_name: Set(dto.requester_name),
        requester_email: Set(dto.requester_email),
        requester_phone: Set(dto.requester_phone),
        vehicle_brand: Set(dto.vehicle_brand),
        vehicle_model: Set(dto.vehicle_model),
        last_replacement_date: Set(dto.last_replacement_date),
        existing_tire_make: Set(dto.existing_tire_make),
        tire_size_required: Set(dto.tire_size_required),
        present_km_reading: Set(dto.present_km_reading),
        previous_km_reading: Set(dto.previous_km_reading),
        tire_wear_pattern: Set(dto.tire_wear_pattern),
        comments: Set(dto.comments),
        status: Set(dto.status),
        submitted_at: Set(dto.submitted_at),
        supervisor_notes: Set(None),
        technical_manager_note: Set(None),
        engineer_note: Set(None),
        customer_officer_note: Set(None),
        supervisor_id: Set(dto.supervisor_id),
        technical_manager_id: Set(None),
        supervisor_decision_by: Set(None),
        engineer_decision_by: Set(None),
        customer_officer_decision_by: Set(None),
        delivery_office_name: Set(dto.delivery_office_name),
        delivery_street_name: Set(dto.delivery_street_name),
        delivery_town: Set(dto.delivery_town),
        total_price: Set(dto.total_price),
        warranty_distance: Set(dto.warranty_distance),
        tire_wear_indicator_appeared: Set(dto.tire_wear_indicator_appeared),
        user_section: Set(dto.user_section),
        cost_center: Set(dto.cost_center),
        supplier_name: Set(None),
        supplier_email: Set(None),
        supplier_phone: Set(None),
        order_number: Set(None),
        order_notes: Set(None),
        order_placed_date: Set(None),
    }
    .insert(conn)
    .await
}

/// Store image URLs for a request as `(image_index, path)` pairs.
pub async fn insert_images<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request_id: i64,
    images: &[(i32, String)],
) -> Result<(), sea_orm::DbErr> {
    if images.is_empty() {
        return Ok(());
    }
    let rows = images.iter().map(|(index, path)| request_images::ActiveModel {
        id: NotSet,
        request_id: Set(request_id),
        image_path: Set(path.clone()),
        image_index: Set(*index),
    });
    request_images::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Images of the given requests, ordered by request then index.
pub async fn images_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request_ids: &[i64],
) -> Result<Vec<request_images::Model>, sea_orm::DbErr> {
    if request_ids.is_empty() {
        return Ok(Vec::new());
    }
    request_images::Entity::find()
        .filter(request_images::Column::RequestId.is_in(request_ids.iter().copied()))
        .order_by_asc(request_images::Column::RequestId)
        .order_by_asc(request_images::Column::ImageIndex)
        .all(conn)
        .await
}

pub async fn delete_images<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = request_images::Entity::delete_many()
        .filter(request_images::Column::RequestId.eq(request_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<requests::Model>, sea_orm::DbErr> {
    requests::Entity::find_by_id(id).one(conn).await
}

/// All requests, newest first.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<requests::Model>, sea_orm::DbErr> {
    requests::Entity::find()
        .order_by_desc(requests::Column::SubmittedAt)
        .order_by_desc(requests::Column::Id)
        .all(conn)
        .await
}

pub async fn list_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<requests::Model>, sea_orm::DbErr> {
    requests::Entity::find()
        .filter(requests::Column::UserId.eq(user_id))
        .order_by_desc(requests::Column::SubmittedAt)
        .order_by_desc(requests::Column::Id)
        .all(conn)
        .await
}

/// Requests for a vehicle whose status is one of `statuses`.
pub async fn for_vehicle_with_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    vehicle_number: &str,
    statuses: Vec<&'static str>,
    submitted_since: Option<OffsetDateTime>,
) -> Result<Vec<requests::Model>, sea_orm::DbErr> {
    let mut query = requests::Entity::find()
        .filter(requests::Column::VehicleNumber.eq(vehicle_number))
        .filter(requests::Column::Status.is_in(statuses));
    if let Some(since) = submitted_since {
        query = query.filter(requests::Column::SubmittedAt.gte(since));
    }
    query
        .order_by_desc(requests::Column::SubmittedAt)
        .all(conn)
        .await
}

pub async fn find_by_vehicle_exact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    vehicle_number: &str,
) -> Result<Vec<requests::Model>, sea_orm::DbErr> {
    requests::Entity::find()
        .filter(requests::Column::VehicleNumber.eq(vehicle_number))
        .order_by_desc(requests::Column::SubmittedAt)
        .all(conn)
        .await
}

/// `LIKE %fragment%` match on the vehicle number.
pub async fn search_by_vehicle<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fragment: &str,
) -> Result<Vec<requests::Model>, sea_orm::DbErr> {
    requests::Entity::find()
        .filter(requests::Column::VehicleNumber.contains(fragment))
        .order_by_desc(requests::Column::SubmittedAt)
        .all(conn)
        .await
}

pub async fn update_fields<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: requests::Model,
    dto: RequestUpdate,
) -> Result<requests::Model, sea_orm::DbErr> {
    let mut a = existing.into_active_model();

    macro_rules! apply {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = dto.$field { a.$field = Set(v); })*
        };
    }
    apply!(
        vehicle_number,
        quantity,
        tubes_quantity,
        tire_size,
        request_reason,
        requester_name,
        requester_email,
        requester_phone,
        vehicle_brand,
        vehicle_model,
        last_replacement_date,
        existing_tire_make,
        tire_size_required,
        present_km_reading,
        previous_km_reading,
        tire_wear_pattern,
        comments,
        supervisor_id,
        technical_manager_id,
        delivery_office_name,
        delivery_street_name,
        delivery_town,
        total_price,
        warranty_distance,
        tire_wear_indicator_appeared,
        user_section,
        cost_center,
    );

    a.update(conn).await
}

/// Set the status and the stage columns present in `write`; absent ones keep their value.
pub async fn write_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: requests::Model,
    write: StatusWrite,
) -> Result<requests::Model, sea_orm::DbErr> {
    let mut a = existing.into_active_model();
    a.status = Set(write.status);

    macro_rules! keep_or_set {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = write.$field { a.$field = Set(Some(v)); })*
        };
    }
    keep_or_set!(
        supervisor_notes,
        supervisor_decision_by,
        technical_manager_note,
        technical_manager_id,
        engineer_note,
        engineer_decision_by,
        customer_officer_note,
        customer_officer_decision_by,
    );

    a.update(conn).await
}

pub async fn write_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: requests::Model,
    write: OrderWrite,
) -> Result<requests::Model, sea_orm::DbErr> {
    let mut a = existing.into_active_model();
    a.status = Set(write.status);
    a.order_number = Set(Some(write.order_number));
    a.customer_officer_note = Set(write.order_notes.clone());
    a.order_notes = Set(write.order_notes);
    a.order_placed_date = Set(Some(write.order_placed_date));
    a.supplier_name = Set(Some(write.supplier_name));
    a.supplier_email = Set(Some(write.supplier_email));
    a.supplier_phone = Set(write.supplier_phone);
    a.update(conn).await
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = requests::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}

/// Re-insert a request under its original id.
pub async fn insert_with_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    model: requests::Model,
) -> Result<(), sea_orm::DbErr> {
    let active: requests::ActiveModel = model.into_active_model().reset_all();
    requests::Entity::insert(active)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    requests::Entity::find().count(conn).await
}

/// Rewrite every row holding `from` to `to`. Returns rows changed.
pub async fn rewrite_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    from: &str,
    to: &str,
) -> Result<u64, sea_orm::DbErr> {
    let res = requests::Entity::update_many()
        .col_expr(requests::Column::Status, Expr::value(to))
        .filter(requests::Column::Status.eq(from))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// `(status, count)` pairs across all requests.
pub async fn status_distribution<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(String, i64)>, sea_orm::DbErr> {
    requests::Entity::find()
        .select_only()
        .column(requests::Column::Status)
        .column_as(Expr::col(requests::Column::Id).count(), "count")
        .group_by(requests::Column::Status)
        .order_by_asc(requests::Column::Status)
        .into_tuple::<(String, i64)>()
        .all(conn)
        .await
}
