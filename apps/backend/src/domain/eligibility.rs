//! Whether a vehicle may receive a new tyre request.
//!
//! A vehicle is blocked while it has an open request, and for a cooldown
//! after a request was fulfilled.

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use super::status::RequestStatus;
use crate::errors::domain::{DomainError, ValidationKind};

pub const COOLDOWN_DAYS: i64 = 30;

const MS_PER_DAY: i128 = 86_400_000;

/// The facts about an earlier request that eligibility looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorRequest {
    pub id: i64,
    pub status: RequestStatus,
    pub submitted_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Eligibility {
    Eligible,
    Pending {
        existing_request_id: i64,
        existing_status: RequestStatus,
    },
    Recent {
        last_request_date: OffsetDateTime,
        days_since: i64,
        days_remaining: i64,
    },
}

/// Start of the cooldown window ending at `now`.
pub fn cooldown_window_start(now: OffsetDateTime) -> OffsetDateTime {
    now - Duration::days(COOLDOWN_DAYS)
}

/// Whole days since `then`, rounded up.
pub fn days_since(then: OffsetDateTime, now: OffsetDateTime) -> i64 {
    let ms = (now - then).whole_milliseconds();
    let days = ms.div_euclid(MS_PER_DAY) + i128::from(ms.rem_euclid(MS_PER_DAY) != 0);
    days as i64
}

/// Decide eligibility from a vehicle's open requests and its recently fulfilled
/// ones. Either slice may contain extra rows; they are filtered here too.
pub fn evaluate(
    open_requests: &[PriorRequest],
    recent_fulfilled: &[PriorRequest],
    now: OffsetDateTime,
) -> Eligibility {
    if let Some(newest) = open_requests
        .iter()
        .filter(|r| r.status.is_open())
        .max_by_key(|r| r.submitted_at)
    {
        return Eligibility::Pending {
            existing_request_id: newest.id,
            existing_status: newest.status,
        };
    }

    let window_start = cooldown_window_start(now);
    if let Some(last) = recent_fulfilled
        .iter()
        .filter(|r| r.status.counts_as_fulfilled() && r.submitted_at >= window_start)
        .max_by_key(|r| r.submitted_at)
    {
        let days_since = days_since(last.submitted_at, now);
        return Eligibility::Recent {
            last_request_date: last.submitted_at,
            days_since,
            days_remaining: COOLDOWN_DAYS - days_since,
        };
    }

    Eligibility::Eligible
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    pub fn message(&self, vehicle_number: &str) -> String {
        match self {
            Eligibility::Eligible => "Vehicle is eligible for a new tire request".to_string(),
            Eligibility::Pending { .. } => format!(
                "Vehicle {vehicle_number} already has a pending tire request. Please wait for the current request to be processed before submitting a new one."
            ),
            Eligibility::Recent { days_since, .. } => format!(
                "Vehicle {vehicle_number} had a tire request completed {days_since} days ago. Please wait at least {COOLDOWN_DAYS} days between tire requests for the same vehicle."
            ),
        }
    }

    /// The rejection to return when a new request is filed, if any.
    pub fn into_error(self, vehicle_number: &str) -> Option<DomainError> {
        let message = self.message(vehicle_number);
        match self {
            Eligibility::Eligible => None,
            Eligibility::Pending {
                existing_request_id,
                existing_status,
            } => Some(DomainError::validation(
                ValidationKind::VehicleHasOpenRequest {
                    existing_request_id,
                    existing_status: existing_status.as_str().to_string(),
                },
                message,
            )),
            Eligibility::Recent {
                last_request_date,
                days_remaining,
                ..
            } => Some(DomainError::validation(
                ValidationKind::VehicleRecentlyServiced {
                    last_request_date: format_timestamp(last_request_date),
                    days_remaining,
                },
                message,
            )),
        }
    }
}

pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}
