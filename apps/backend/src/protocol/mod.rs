//! JSON shapes returned by the HTTP API.

pub mod catalog;
pub mod receipts;
pub mod requests;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::domain::eligibility::format_timestamp;

pub(crate) fn money(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

pub(crate) fn timestamp(ts: OffsetDateTime) -> String {
    format_timestamp(ts)
}

pub(crate) fn opt_timestamp(ts: Option<OffsetDateTime>) -> Option<String> {
    ts.map(format_timestamp)
}
