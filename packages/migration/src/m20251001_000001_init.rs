use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table, TableCreateStatement};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    AzureId,
    Email,
    Name,
    Role,
    CostCentre,
    Department,
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
    RegisteredBy,
    VehicleNumber,
    Make,
    Model,
    VehicleType,
    Status,
    CostCentre,
    Department,
}

#[derive(Iden)]
enum Requests {
    Table,
    Id,
    UserId,
    VehicleId,
    VehicleNumber,
    Quantity,
    TubesQuantity,
    TireSize,
    RequestReason,
    RequesterName,
    RequesterEmail,
    RequesterPhone,
    VehicleBrand,
    VehicleModel,
    LastReplacementDate,
    ExistingTireMake,
    TireSizeRequired,
    PresentKmReading,
    PreviousKmReading,
    TireWearPattern,
    Comments,
    Status,
    SubmittedAt,
    SupervisorNotes,
    TechnicalManagerNote,
    EngineerNote,
    CustomerOfficerNote,
    SupervisorId,
    TechnicalManagerId,
    SupervisorDecisionBy,
    EngineerDecisionBy,
    CustomerOfficerDecisionBy,
    DeliveryOfficeName,
    DeliveryStreetName,
    DeliveryTown,
    TotalPrice,
    WarrantyDistance,
    TireWearIndicatorAppeared,
    Department,
    CostCenter,
    SupplierName,
    SupplierEmail,
    SupplierPhone,
    OrderNumber,
    OrderNotes,
    OrderPlacedDate,
}

#[derive(Iden)]
enum RequestBackups {
    Table,
    DeletedAt,
    DeletedBy,
    DeletedByRole,
}

#[derive(Iden)]
enum RequestImages {
    Table,
    Id,
    RequestId,
    ImagePath,
    ImageIndex,
}

#[derive(Iden)]
enum RequestImageBackups {
    Table,
    Id,
    RequestId,
    ImagePath,
    ImageIndex,
}

#[derive(Iden)]
enum Suppliers {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Address,
    FormsfreeKey,
}

#[derive(Iden)]
enum TireDetails {
    Table,
    Id,
    TireSize,
    TireBrand,
    TotalPrice,
    WarrantyDistance,
}

#[derive(Iden)]
enum Receipts {
    Table,
    Id,
    ReceiptNumber,
    RequestId,
    OrderNumber,
    DateGenerated,
    TotalAmount,
    CustomerOfficerId,
    CustomerOfficerName,
    VehicleNumber,
    VehicleBrand,
    VehicleModel,
    SupplierName,
    SupplierEmail,
    SupplierPhone,
    Items,
    Notes,
    SubmittedDate,
    OrderPlacedDate,
    CreatedAt,
    UpdatedAt,
}

/// Every column a live request carries. `request_backups` reuses the same
/// set so a restore is a plain column-for-column copy.
fn request_columns(table: &mut TableCreateStatement) {
    table
        .col(ColumnDef::new(Requests::UserId).big_integer().not_null())
        .col(ColumnDef::new(Requests::VehicleId).big_integer().not_null())
        .col(
            ColumnDef::new(Requests::VehicleNumber)
                .string_len(50)
                .not_null(),
        )
        .col(ColumnDef::new(Requests::Quantity).integer().not_null())
        .col(ColumnDef::new(Requests::TubesQuantity).integer().not_null())
        .col(ColumnDef::new(Requests::TireSize).string_len(50).not_null())
        .col(ColumnDef::new(Requests::RequestReason).text().not_null())
        .col(
            ColumnDef::new(Requests::RequesterName)
                .string_len(100)
                .not_null(),
        )
        .col(
            ColumnDef::new(Requests::RequesterEmail)
                .string_len(100)
                .not_null(),
        )
        .col(
            ColumnDef::new(Requests::RequesterPhone)
                .string_len(20)
                .not_null(),
        )
        .col(ColumnDef::new(Requests::VehicleBrand).string_len(50).not_null())
        .col(ColumnDef::new(Requests::VehicleModel).string_len(50).not_null())
        .col(ColumnDef::new(Requests::LastReplacementDate).date().not_null())
        .col(
            ColumnDef::new(Requests::ExistingTireMake)
                .string_len(100)
                .not_null(),
        )
        .col(
            ColumnDef::new(Requests::TireSizeRequired)
                .string_len(50)
                .not_null(),
        )
        .col(ColumnDef::new(Requests::PresentKmReading).integer().not_null())
        .col(
            ColumnDef::new(Requests::PreviousKmReading)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(Requests::TireWearPattern)
                .string_len(100)
                .not_null(),
        )
        .col(ColumnDef::new(Requests::Comments).text().null())
        .col(
            ColumnDef::new(Requests::Status)
                .string_len(50)
                .not_null()
                .default("User Requested tire"),
        )
        .col(
            ColumnDef::new(Requests::SubmittedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(ColumnDef::new(Requests::SupervisorNotes).text().null())
        .col(ColumnDef::new(Requests::TechnicalManagerNote).text().null())
        .col(ColumnDef::new(Requests::EngineerNote).text().null())
        .col(ColumnDef::new(Requests::CustomerOfficerNote).text().null())
        .col(ColumnDef::new(Requests::SupervisorId).big_integer().null())
        .col(ColumnDef::new(Requests::TechnicalManagerId).big_integer().null())
        .col(
            ColumnDef::new(Requests::SupervisorDecisionBy)
                .big_integer()
                .null(),
        )
        .col(ColumnDef::new(Requests::EngineerDecisionBy).big_integer().null())
        .col(
            ColumnDef::new(Requests::CustomerOfficerDecisionBy)
                .big_integer()
                .null(),
        )
        .col(
            ColumnDef::new(Requests::DeliveryOfficeName)
                .string_len(100)
                .null(),
        )
        .col(
            ColumnDef::new(Requests::DeliveryStreetName)
                .string_len(255)
                .null(),
        )
        .col(ColumnDef::new(Requests::DeliveryTown).string_len(100).null())
        .col(ColumnDef::new(Requests::TotalPrice).decimal_len(10, 2).null())
        .col(ColumnDef::new(Requests::WarrantyDistance).integer().null())
        .col(
            ColumnDef::new(Requests::TireWearIndicatorAppeared)
                .boolean()
                .null()
                .default(false),
        )
        .col(ColumnDef::new(Requests::Department).string_len(100).null())
        .col(ColumnDef::new(Requests::CostCenter).string_len(100).null())
        .col(ColumnDef::new(Requests::SupplierName).string_len(255).null())
        .col(ColumnDef::new(Requests::SupplierEmail).string_len(255).null())
        .col(ColumnDef::new(Requests::SupplierPhone).string_len(255).null())
        .col(ColumnDef::new(Requests::OrderNumber).string_len(255).null())
        .col(ColumnDef::new(Requests::OrderNotes).text().null())
        .col(
            ColumnDef::new(Requests::OrderPlacedDate)
                .timestamp_with_time_zone()
                .null(),
        );
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Users::AzureId)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string_len(255).null())
                    .col(ColumnDef::new(Users::Role).string_len(50).null())
                    .col(ColumnDef::new(Users::CostCentre).string_len(100).null())
                    .col(ColumnDef::new(Users::Department).string_len(100).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        // vehicles
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Vehicles::RegisteredBy).big_integer().null())
                    .col(
                        ColumnDef::new(Vehicles::VehicleNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Make).string_len(50).null())
                    .col(ColumnDef::new(Vehicles::Model).string_len(50).null())
                    .col(ColumnDef::new(Vehicles::VehicleType).string_len(50).null())
                    .col(ColumnDef::new(Vehicles::Status).string_len(20).null())
                    .col(ColumnDef::new(Vehicles::CostCentre).string_len(100).null())
                    .col(ColumnDef::new(Vehicles::Department).string_len(100).null())
                    .to_owned(),
            )
            .await?;

        // requests
        let mut requests = Table::create();
        requests.table(Requests::Table).if_not_exists().col(
            ColumnDef::new(Requests::Id)
                .big_integer()
                .not_null()
                .primary_key()
                .auto_increment(),
        );
        request_columns(&mut requests);
        manager.create_table(requests.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_requests_vehicle_number")
                    .table(Requests::Table)
                    .col(Requests::VehicleNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_requests_user_id")
                    .table(Requests::Table)
                    .col(Requests::UserId)
                    .to_owned(),
            )
            .await?;

        // request_images
        manager
            .create_table(
                Table::create()
                    .table(RequestImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequestImages::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(RequestImages::RequestId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequestImages::ImagePath)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequestImages::ImageIndex)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_images_request_id")
                            .from(RequestImages::Table, RequestImages::RequestId)
                            .to(Requests::Table, Requests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_request_images_request_id")
                    .table(RequestImages::Table)
                    .col(RequestImages::RequestId)
                    .to_owned(),
            )
            .await?;

        // request_backups: keyed by the original request id
        let mut backups = Table::create();
        backups.table(RequestBackups::Table).if_not_exists().col(
            ColumnDef::new(Requests::Id)
                .big_integer()
                .not_null()
                .primary_key(),
        );
        request_columns(&mut backups);
        backups
            .col(
                ColumnDef::new(RequestBackups::DeletedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(ColumnDef::new(RequestBackups::DeletedBy).big_integer().null())
            .col(
                ColumnDef::new(RequestBackups::DeletedByRole)
                    .string_len(50)
                    .null(),
            );
        manager.create_table(backups.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_request_backups_user_id")
                    .table(RequestBackups::Table)
                    .col(Requests::UserId)
                    .to_owned(),
            )
            .await?;

        // request_image_backups
        manager
            .create_table(
                Table::create()
                    .table(RequestImageBackups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequestImageBackups::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(RequestImageBackups::RequestId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequestImageBackups::ImagePath)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequestImageBackups::ImageIndex)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_request_image_backups_request_id")
                    .table(RequestImageBackups::Table)
                    .col(RequestImageBackups::RequestId)
                    .to_owned(),
            )
            .await?;

        // suppliers
        manager
            .create_table(
                Table::create()
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Suppliers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Suppliers::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Suppliers::Email).string_len(100).not_null())
                    .col(ColumnDef::new(Suppliers::Phone).string_len(20).null())
                    .col(ColumnDef::new(Suppliers::Address).text().null())
                    .col(
                        ColumnDef::new(Suppliers::FormsfreeKey)
                            .string_len(255)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // tire_details
        manager
            .create_table(
                Table::create()
                    .table(TireDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TireDetails::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(TireDetails::TireSize)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TireDetails::TireBrand).text().null())
                    .col(ColumnDef::new(TireDetails::TotalPrice).integer().null())
                    .col(ColumnDef::new(TireDetails::WarrantyDistance).integer().null())
                    .to_owned(),
            )
            .await?;

        // receipts
        manager
            .create_table(
                Table::create()
                    .table(Receipts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Receipts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Receipts::ReceiptNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Receipts::RequestId).big_integer().not_null())
                    .col(ColumnDef::new(Receipts::OrderNumber).string_len(255).null())
                    .col(
                        ColumnDef::new(Receipts::DateGenerated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::TotalAmount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::CustomerOfficerId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::CustomerOfficerName)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(Receipts::VehicleNumber).string_len(50).null())
                    .col(ColumnDef::new(Receipts::VehicleBrand).string_len(50).null())
                    .col(ColumnDef::new(Receipts::VehicleModel).string_len(50).null())
                    .col(ColumnDef::new(Receipts::SupplierName).string_len(255).null())
                    .col(ColumnDef::new(Receipts::SupplierEmail).string_len(255).null())
                    .col(ColumnDef::new(Receipts::SupplierPhone).string_len(255).null())
                    .col(ColumnDef::new(Receipts::Items).text().not_null())
                    .col(ColumnDef::new(Receipts::Notes).text().null())
                    .col(
                        ColumnDef::new(Receipts::SubmittedDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::OrderPlacedDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_receipts_request_id")
                    .table(Receipts::Table)
                    .col(Receipts::RequestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_receipts_order_number")
                    .table(Receipts::Table)
                    .col(Receipts::OrderNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // reverse order; images reference requests
        manager
            .drop_table(Table::drop().table(Receipts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TireDetails::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Suppliers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(RequestImageBackups::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(RequestBackups::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(RequestImages::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Requests::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vehicles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
