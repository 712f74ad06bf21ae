//! Input handling for the supplier, tyre size and vehicle catalogues.

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, NoneAsEmptyString, PickFirst};

use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::suppliers::SupplierWrite;
use crate::repos::tire_details::TireDetailsWrite;
use crate::repos::vehicles::VehicleCreate;

fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub formsfree_key: Option<String>,
}

impl SupplierInput {
    pub fn into_write(self) -> Result<SupplierWrite, DomainError> {
        match (filled(self.name), filled(self.email), filled(self.formsfree_key)) {
            (Some(name), Some(email), Some(formsfree_key)) => Ok(SupplierWrite {
                name,
                email,
                phone: filled(self.phone),
                address: filled(self.address),
                formsfree_key,
            }),
            _ => Err(DomainError::validation(
                ValidationKind::MissingField,
                "Name, email, and formsfree_key are required",
            )),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TireDetailsInput {
    #[serde(default)]
    pub tire_size: Option<String>,
    #[serde(default)]
    pub tire_brand: Option<String>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub total_price: Option<i32>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub warranty_distance: Option<i32>,
}

impl TireDetailsInput {
    pub fn into_write(self) -> Result<TireDetailsWrite, DomainError> {
        let tire_size = filled(self.tire_size).ok_or_else(|| {
            DomainError::validation(ValidationKind::MissingField, "Tire size is required")
        })?;
        Ok(TireDetailsWrite {
            tire_size,
            tire_brand: filled(self.tire_brand),
            total_price: self.total_price,
            warranty_distance: self.warranty_distance,
        })
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, rename = "type")]
    pub vehicle_type: Option<String>,
    #[serde(default, rename = "cost_centre")]
    pub cost_centre: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub registered_by: Option<i64>,
}

impl VehicleInput {
    pub fn into_create(self) -> Result<VehicleCreate, DomainError> {
        let vehicle_number = filled(self.vehicle_number).ok_or_else(|| {
            DomainError::validation(ValidationKind::MissingField, "Vehicle number is required")
        })?;
        Ok(VehicleCreate {
            vehicle_number,
            registered_by: self.registered_by,
            make: filled(self.make),
            model: filled(self.model),
            vehicle_type: filled(self.vehicle_type),
            status: filled(self.status),
            cost_centre: filled(self.cost_centre),
            department: filled(self.department),
        })
    }
}
