//! Outbound order email delivery.

pub mod formspree;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

pub use formspree::FormspreeMailer;

use crate::domain::order_email::OrderEmail;
use crate::errors::domain::DomainError;

/// What the relay said about a delivered order email.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailReceipt {
    pub success: bool,
    pub message: String,
    pub supplier: String,
    pub email: String,
    pub formsfree_response: Value,
}

/// Delivers composed order emails to suppliers.
///
/// Failures come back as `InfraErrorKind::MailRelay` so callers can abort
/// before writing anything.
#[async_trait]
pub trait OrderMailer: Send + Sync {
    async fn send(
        &self,
        endpoint: &str,
        supplier_name: &str,
        email: &OrderEmail,
    ) -> Result<MailReceipt, DomainError>;
}
