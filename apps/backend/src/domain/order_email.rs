//! Supplier order email composition and form-relay endpoint resolution.

use lazy_regex::{regex_captures, regex_is_match};
use serde::Serialize;

use crate::errors::domain::{DomainError, ValidationKind};

/// Public endpoint prefix of the form relay.
pub const FORMSPREE_PREFIX: &str = "https://formspree.io/f/";

/// Payload posted to the form relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderEmail {
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct EmailSupplier {
    pub name: String,
    pub email: String,
}

/// Request fields the order letter quotes.
#[derive(Debug, Clone)]
pub struct EmailRequest {
    pub id: i64,
    pub vehicle_number: String,
    pub tire_size_required: String,
    pub quantity: i32,
    pub tubes_quantity: i32,
    pub delivery_office_name: Option<String>,
    pub delivery_street_name: Option<String>,
    pub delivery_town: Option<String>,
    pub requester_name: String,
    pub requester_email: String,
    pub requester_phone: String,
    pub user_section: Option<String>,
}

/// Resolve a supplier's stored form key into the endpoint to POST to.
///
/// Full relay URLs are kept, other http(s) URLs must contain `/f/<id>`, and a
/// bare id is joined onto `base`.
pub fn formspree_endpoint(key: &str, base: &str) -> Result<String, DomainError> {
    let key = key.trim();
    let invalid = || {
        DomainError::validation(
            ValidationKind::InvalidFormKey,
            "Invalid Formspree URL format",
        )
    };
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };

    if key.starts_with(FORMSPREE_PREFIX) || (key.starts_with(&base) && key.len() > base.len()) {
        return Ok(key.to_string());
    }
    if key.starts_with("http://") || key.starts_with("https://") {
        let (_, id) = regex_captures!(r"/f/([a-zA-Z0-9]+)", key).ok_or_else(invalid)?;
        return Ok(format!("{base}{id}"));
    }
    if regex_is_match!(r"^[A-Za-z0-9]+$", key) {
        return Ok(format!("{base}{key}"));
    }
    Err(invalid())
}

/// Placeholder notes like `ok` or `N/A` are left out of the letter.
pub fn should_include_notes(notes: Option<&str>) -> bool {
    match notes.map(str::trim) {
        None | Some("") => false,
        Some(n) => !n.eq_ignore_ascii_case("ok") && n != "N/A" && n != "None",
    }
}

fn plural(n: i32, word: &str) -> String {
    if n > 1 {
        format!("{word}s")
    } else {
        word.to_string()
    }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn compose_order_email(
    supplier: &EmailSupplier,
    request: &EmailRequest,
    notes: Option<&str>,
    order_number: &str,
) -> OrderEmail {
    let mut quantity_line = format!(
        "{} {}",
        request.quantity,
        plural(request.quantity, "tire")
    );
    if request.tubes_quantity > 0 {
        quantity_line.push_str(&format!(
            " and {} {}",
            request.tubes_quantity,
            plural(request.tubes_quantity, "tube")
        ));
    }

    let delivery: Vec<&str> = [
        &request.delivery_office_name,
        &request.delivery_street_name,
        &request.delivery_town,
    ]
    .into_iter()
    .filter_map(non_blank)
    .collect();
    let delivery_paragraph = if delivery.is_empty() {
        String::new()
    } else {
        format!("\n\nPlease arrange delivery to: {}.", delivery.join(", "))
    };

    let notes_block = match notes {
        Some(n) if should_include_notes(Some(n)) => {
            format!("Additional Requirements: {}\n\n", n.trim())
        }
        _ => String::new(),
    };

    let message = format!(
        "Dear {supplier_name},

I hope this message finds you well. This is an official tire order from SLT Mobitel.

Order Number: {order_number}
Request ID: {request_id}

Product Details:
• Vehicle Number: {vehicle_number}
• Tire Size Required: {tire_size}
• Quantity: {quantity_line}{delivery_paragraph}

{notes_block}We would greatly appreciate if you could provide us with your most competitive pricing along with your delivery schedule and terms of service.

Thank you for your continued partnership. We look forward to your prompt response.

Best regards,
{requester_name}
{user_section}
SLT Mobitel

Contact Details:
Phone: {phone}
Email: {email}",
        supplier_name = supplier.name,
        request_id = request.id,
        vehicle_number = request.vehicle_number,
        tire_size = request.tire_size_required,
        requester_name = request.requester_name,
        user_section = request.user_section.as_deref().unwrap_or_default(),
        phone = request.requester_phone,
        email = request.requester_email,
    );

    OrderEmail {
        email: supplier.email.clone(),
        subject: format!("🚛 SLT Mobitel Tire Order - {order_number}"),
        message: message.trim().to_string(),
    }
}
