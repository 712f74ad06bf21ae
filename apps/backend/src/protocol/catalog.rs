//! Catalogue rows: users, vehicles, suppliers, tyre details.

use serde::Serialize;

use crate::entities::{suppliers, tire_details, users, vehicles};

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i64,
    pub azure_id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub cost_centre: Option<String>,
    pub department: Option<String>,
}

impl From<users::Model> for UserView {
    fn from(u: users::Model) -> Self {
        Self {
            id: u.id,
            azure_id: u.azure_id,
            email: u.email,
            name: u.name,
            role: u.role,
            cost_centre: u.cost_centre,
            department: u.department,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleView {
    pub id: i64,
    pub registered_by: Option<i64>,
    pub vehicle_number: String,
    pub make: Option<String>,
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "cost_centre")]
    pub cost_centre: Option<String>,
    pub department: Option<String>,
}

impl From<vehicles::Model> for VehicleView {
    fn from(v: vehicles::Model) -> Self {
        Self {
            id: v.id,
            registered_by: v.registered_by,
            vehicle_number: v.vehicle_number,
            make: v.make,
            model: v.model,
            vehicle_type: v.vehicle_type,
            status: v.status,
            cost_centre: v.cost_centre,
            department: v.department,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplierView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub formsfree_key: String,
}

impl From<suppliers::Model> for SupplierView {
    fn from(s: suppliers::Model) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
            phone: s.phone,
            address: s.address,
            formsfree_key: s.formsfree_key,
        }
    }
}

/// The supplier block echoed after an order is placed.
#[derive(Debug, Clone, Serialize)]
pub struct OrderedFrom {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&suppliers::Model> for OrderedFrom {
    fn from(s: &suppliers::Model) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            email: s.email.clone(),
            phone: s.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TireDetailsView {
    pub id: i64,
    pub tire_size: String,
    pub tire_brand: Option<String>,
    pub total_price: Option<i32>,
    pub warranty_distance: Option<i32>,
}

impl From<tire_details::Model> for TireDetailsView {
    fn from(t: tire_details::Model) -> Self {
        Self {
            id: t.id,
            tire_size: t.tire_size,
            tire_brand: t.tire_brand,
            total_price: t.total_price,
            warranty_distance: t.warranty_distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_keys() {
        let json = serde_json::to_value(VehicleView::from(vehicles::Model {
            id: 3,
            registered_by: Some(9),
            vehicle_number: "WP CAB-1234".into(),
            make: Some("Toyota".into()),
            model: None,
            vehicle_type: Some("Van".into()),
            status: None,
            cost_centre: Some("CC-1".into()),
            department: None,
        }))
        .unwrap();
        assert_eq!(json["vehicleNumber"], "WP CAB-1234");
        assert_eq!(json["registeredBy"], 9);
        assert_eq!(json["type"], "Van");
        assert_eq!(json["cost_centre"], "CC-1");
    }
}
