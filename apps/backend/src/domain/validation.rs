//! Input rules for new requests and orders.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::errors::domain::{DomainError, ValidationKind};

/// Fields a new request must carry, in the order they are checked.
pub const REQUIRED_REQUEST_FIELDS: [&str; 20] = [
    "userId",
    "vehicleId",
    "vehicleNumber",
    "quantity",
    "tubesQuantity",
    "tireSize",
    "requestReason",
    "requesterName",
    "requesterEmail",
    "requesterPhone",
    "vehicleBrand",
    "vehicleModel",
    "lastReplacementDate",
    "existingTireMake",
    "tireSizeRequired",
    "presentKmReading",
    "previousKmReading",
    "tireWearPattern",
    "userSection",
    "costCenter",
];

pub const MAX_PHONE_DIGITS: usize = 10;

/// Fail on the first required field `is_present` rejects.
pub fn require_fields(is_present: impl Fn(&str) -> bool) -> Result<(), DomainError> {
    match REQUIRED_REQUEST_FIELDS
        .iter()
        .find(|field| !is_present(field))
    {
        Some(field) => Err(DomainError::validation(
            ValidationKind::MissingField,
            format!("Missing required field: {field}"),
        )),
        None => Ok(()),
    }
}

/// Keep the digits of a phone number and check them. Returns the digits.
pub fn validate_phone(raw: &str) -> Result<String, DomainError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let reject = |msg: &str| Err(DomainError::validation(ValidationKind::InvalidPhone, msg));

    if digits.is_empty() {
        return reject("Phone number is required");
    }
    if digits.len() > MAX_PHONE_DIGITS {
        return reject("Phone number cannot exceed 10 digits");
    }
    if digits.starts_with('0') {
        return reject("Phone number cannot start with zero");
    }
    Ok(digits)
}

/// Tyre and tube counts may be zero but never negative.
pub fn validate_count(field: &str, count: i32) -> Result<i32, DomainError> {
    if count < 0 {
        return Err(DomainError::validation(
            ValidationKind::Other(field.to_string()),
            format!("{field} cannot be negative"),
        ));
    }
    Ok(count)
}

/// Parse an order date given as an RFC 3339 timestamp or a bare `YYYY-MM-DD`
/// (taken as midnight UTC).
pub fn parse_order_date(raw: &str) -> Result<OffsetDateTime, DomainError> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(ts);
    }
    parse_ymd(raw)
        .map(|d| d.midnight().assume_utc())
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidDate,
                "Invalid order placed date format",
            )
        })
}

/// Parse a calendar date; a full timestamp contributes its date part.
pub fn parse_calendar_date(field: &str, raw: &str) -> Result<Date, DomainError> {
    let raw = raw.trim();
    parse_ymd(raw)
        .or_else(|| OffsetDateTime::parse(raw, &Rfc3339).ok().map(|ts| ts.date()))
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidDate,
                format!("Invalid date for {field}: expected YYYY-MM-DD"),
            )
        })
}

fn parse_ymd(raw: &str) -> Option<Date> {
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use time::macros::{date, datetime};

    use super::*;

    fn phone_err(raw: &str) -> String {
        match validate_phone(raw).unwrap_err() {
            DomainError::Validation(ValidationKind::InvalidPhone, msg) => msg,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn phone_rules() {
        assert_eq!(validate_phone("771-234 567").unwrap(), "771234567");
        assert_eq!(phone_err("  -- "), "Phone number is required");
        assert_eq!(phone_err("77123456789"), "Phone number cannot exceed 10 digits");
        assert_eq!(phone_err("0771234567"), "Phone number cannot start with zero");
    }

    #[test]
    fn first_missing_field_is_reported() {
        let err = require_fields(|f| f != "tireSize" && f != "costCenter").unwrap_err();
        assert_eq!(
            err,
            DomainError::validation(ValidationKind::MissingField, "Missing required field: tireSize")
        );
        assert!(require_fields(|_| true).is_ok());
    }

    #[test]
    fn counts_reject_negatives_only() {
        assert_eq!(validate_count("quantity", 0).unwrap(), 0);
        assert_eq!(validate_count("quantity", 4).unwrap(), 4);
        let err = validate_count("tubesQuantity", -1).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation(
                ValidationKind::Other("tubesQuantity".into()),
                "tubesQuantity cannot be negative"
            )
        );
    }

    #[test]
    fn order_dates() {
        assert_eq!(
            parse_order_date("2025-03-04").unwrap(),
            datetime!(2025-03-04 0:00 UTC)
        );
        assert_eq!(
            parse_order_date("2025-03-04T10:15:00+05:30").unwrap(),
            datetime!(2025-03-04 10:15 +5:30)
        );
        assert!(parse_order_date("04/03/2025").is_err());
        assert!(parse_order_date("").is_err());
    }

    #[test]
    fn calendar_dates_accept_timestamps() {
        assert_eq!(
            parse_calendar_date("lastReplacementDate", "2024-12-01T00:00:00Z").unwrap(),
            date!(2024 - 12 - 01)
        );
        assert!(parse_calendar_date("lastReplacementDate", "yesterday").is_err());
    }

    proptest! {
        #[test]
        fn accepted_phones_are_short_digit_strings(raw in "[0-9 ()+-]{0,16}") {
            if let Ok(digits) = validate_phone(&raw) {
                prop_assert!(!digits.is_empty());
                prop_assert!(digits.len() <= MAX_PHONE_DIGITS);
                prop_assert!(!digits.starts_with('0'));
                prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }
}
