//! SeaORM adapters, one module per table group.

pub mod receipts_sea;
pub mod requests_sea;
pub mod suppliers_sea;
pub mod tire_details_sea;
pub mod users_sea;
pub mod vehicles_sea;
