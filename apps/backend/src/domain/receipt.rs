//! Receipt numbering and line items.

use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

/// Attempts at drawing an unused receipt number before giving up.
pub const RECEIPT_NUMBER_ATTEMPTS: usize = 5;

/// Issuer block printed on every formatted receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompanyDetails {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
}

pub const COMPANY: CompanyDetails = CompanyDetails {
    name: "SLT Mobitel Tire Management",
    address: "123 Corporate Drive, Colombo",
    phone: "+94 11 234 5678",
    email: "tiremanagement@cpc.lk",
};

/// `RCP-YYYYMMDD-NNNN` with a random four-digit suffix.
pub fn receipt_number<R: Rng>(date: Date, rng: &mut R) -> String {
    let suffix: u16 = rng.random_range(1000..=9999);
    format!(
        "RCP-{:04}{:02}{:02}-{suffix}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// The tyres an order covers.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedTyres {
    pub tire_size_required: String,
    pub quantity: i32,
    pub tubes_quantity: i32,
    pub total_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub description: String,
    pub tire_size: String,
    pub quantity: i32,
    pub tubes_quantity: i32,
    pub unit_price: f64,
    pub total: f64,
}

/// One line item for the whole order. A zero quantity prices as one unit.
pub fn receipt_items(order: &OrderedTyres) -> Vec<ReceiptItem> {
    let total = order.total_price.unwrap_or(Decimal::ZERO);
    let divisor = if order.quantity > 0 { order.quantity } else { 1 };
    let unit_price = (total / Decimal::from(divisor)).round_dp(2);

    vec![ReceiptItem {
        description: format!("{} Tires", order.tire_size_required),
        tire_size: order.tire_size_required.clone(),
        quantity: order.quantity,
        tubes_quantity: order.tubes_quantity,
        unit_price: unit_price.to_f64().unwrap_or_default(),
        total: total.to_f64().unwrap_or_default(),
    }]
}
