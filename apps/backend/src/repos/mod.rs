//! Repository functions for the service layer.
//!
//! Each function is generic over `ConnectionTrait`, so the same call runs on
//! the pool or inside a transaction. Storage errors surface as `DomainError`.

pub mod receipts;
pub mod requests;
pub mod suppliers;
pub mod tire_details;
pub mod users;
pub mod vehicles;
