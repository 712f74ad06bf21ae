use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use super::{MailReceipt, OrderMailer};
use crate::config::app::MailerConfig;
use crate::domain::order_email::OrderEmail;
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::logging::pii::Redacted;

/// Posts order emails to a Formspree form endpoint as JSON.
#[derive(Debug, Clone)]
pub struct FormspreeMailer {
    client: Client,
}

impl FormspreeMailer {
    pub fn new(config: &MailerConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build mail relay client: {e}")))?;
        Ok(Self { client })
    }
}

fn relay_error(detail: impl Into<String>) -> DomainError {
    DomainError::infra(
        InfraErrorKind::MailRelay,
        format!("Failed to send order email: {}", detail.into()),
    )
}

#[async_trait]
impl OrderMailer for FormspreeMailer {
    async fn send(
        &self,
        endpoint: &str,
        supplier_name: &str,
        email: &OrderEmail,
    ) -> Result<MailReceipt, DomainError> {
        info!(
            endpoint = %Redacted(endpoint),
            to = %Redacted(&email.email),
            subject = %email.subject,
            "Sending order email"
        );

        let response = self
            .client
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .json(email)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, timeout = e.is_timeout(), "Form relay request failed");
                if e.is_timeout() {
                    relay_error("form relay timed out")
                } else {
                    relay_error(format!("form relay unreachable: {e}"))
                }
            })?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "Could not read form relay reply");
                String::new()
            }
        };

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %Redacted(&body), "Form relay rejected order email");
            return Err(relay_error(format!("Formspree API error: {status} - {body}")));
        }

        let formsfree_response =
            serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));

        info!(status = status.as_u16(), "Order email accepted by form relay");
        Ok(MailReceipt {
            success: true,
            message: "Order email sent successfully".to_string(),
            supplier: supplier_name.to_string(),
            email: email.email.clone(),
            formsfree_response,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::http::header;
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use serde_json::json;

    use super::*;

    fn mailer() -> FormspreeMailer {
        FormspreeMailer::new(&MailerConfig {
            formspree_base_url: "http://127.0.0.1:9/f/".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn order_email(to: &str) -> OrderEmail {
        OrderEmail {
            email: to.into(),
            subject: "SLT Mobitel Tire Order - PO-9".into(),
            message: "Dear Lanka Tyres,".into(),
        }
    }

    /// Stand-in relay: bounces one address, echoes the rest.
    async fn relay(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
        if body["email"] == "bounce@lankatyres.example" {
            return HttpResponse::UnprocessableEntity().body("form is disabled");
        }
        let accept = req
            .headers()
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        HttpResponse::Ok().json(json!({
            "ok": true,
            "accept": accept,
            "subject": body["subject"],
        }))
    }

    /// Serve the relay on an ephemeral port; returns its `/f/` prefix.
    fn spawn_relay() -> String {
        let server = HttpServer::new(|| App::new().route("/f/{form}", web::post().to(relay)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{addr}/f/")
    }

    #[actix_web::test]
    async fn accepted_email_returns_relay_reply() {
        let base = spawn_relay();
        let receipt = mailer()
            .send(
                &format!("{base}mnqwerty"),
                "Lanka Tyres",
                &order_email("orders@lankatyres.example"),
            )
            .await
            .unwrap();

        assert!(receipt.success);
        assert_eq!(receipt.message, "Order email sent successfully");
        assert_eq!(receipt.supplier, "Lanka Tyres");
        assert_eq!(receipt.email, "orders@lankatyres.example");
        assert_eq!(receipt.formsfree_response["ok"], true);
        assert_eq!(receipt.formsfree_response["accept"], "application/json");
        assert_eq!(
            receipt.formsfree_response["subject"],
            "SLT Mobitel Tire Order - PO-9"
        );
    }

    #[actix_web::test]
    async fn rejected_email_carries_status_and_body() {
        let base = spawn_relay();
        let err = mailer()
            .send(
                &format!("{base}mnqwerty"),
                "Lanka Tyres",
                &order_email("bounce@lankatyres.example"),
            )
            .await
            .unwrap_err();

        match err {
            DomainError::Infra(InfraErrorKind::MailRelay, detail) => {
                assert!(detail.starts_with("Failed to send order email: Formspree API error: 422"));
                assert!(detail.ends_with("form is disabled"), "{detail}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_relay_is_mail_relay_error() {
        let err = mailer()
            .send(
                "http://127.0.0.1:9/f/abc",
                "Acme",
                &order_email("orders@example.com"),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Infra(InfraErrorKind::MailRelay, _)
        ));
    }
}
