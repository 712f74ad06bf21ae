pub mod catalog;
pub mod orders;
pub mod receipts;
pub mod requests;
pub mod status_migration;
