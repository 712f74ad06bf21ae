//! In-process stand-in for the form relay.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tyre_backend::domain::order_email::OrderEmail;
use tyre_backend::errors::domain::{DomainError, InfraErrorKind};
use tyre_backend::mailer::{MailReceipt, OrderMailer};

#[derive(Debug, Clone)]
pub struct SentMail {
    pub endpoint: String,
    pub supplier_name: String,
    pub email: OrderEmail,
}

/// Records every send; flip `fail` to make the relay refuse.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.fail.store(true, Ordering::SeqCst);
        mailer
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderMailer for RecordingMailer {
    async fn send(
        &self,
        endpoint: &str,
        supplier_name: &str,
        email: &OrderEmail,
    ) -> Result<MailReceipt, DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::infra(
                InfraErrorKind::MailRelay,
                "Formspree returned 422: form not found",
            ));
        }
        self.sent.lock().unwrap().push(SentMail {
            endpoint: endpoint.to_string(),
            supplier_name: supplier_name.to_string(),
            email: email.clone(),
        });
        Ok(MailReceipt {
            success: true,
            message: format!("Email sent to {supplier_name}"),
            supplier: supplier_name.to_string(),
            email: email.email.clone(),
            formsfree_response: json!({ "ok": true }),
        })
    }
}
