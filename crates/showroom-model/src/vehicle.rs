//! Vehicle types as served by the Resource Service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Fuel type of a vehicle.
///
/// The wire values are capitalized (`"Petrol"`, `"Diesel"`, `"Electric"`),
/// matching the service's validation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
}

impl FuelType {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Electric",
        }
    }

    /// All accepted fuel types.
    pub const ALL: [FuelType; 3] = [Self::Petrol, Self::Diesel, Self::Electric];
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = ModelError;

    /// Parse a fuel type string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "petrol" => Ok(FuelType::Petrol),
            "diesel" => Ok(FuelType::Diesel),
            "electric" => Ok(FuelType::Electric),
            _ => Err(ModelError::UnknownFuelType(s.to_string())),
        }
    }
}

/// A vehicle listed in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub brand: String,
    pub name: String,
    /// Price in whole rupees.
    pub price: i64,
    pub fuel_type: FuelType,
    pub image_url: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Combined display title, e.g. "Tata Ace EV".
    pub fn title(&self) -> String {
        format!("{} {}", self.brand, self.name)
    }
}

/// A vehicle reference inside a bookmark or booking record.
///
/// The service embeds the full vehicle in list responses, but older record
/// shapes carry only the numeric id. Both deserialize; the id is always
/// available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleRef {
    Embedded(Vehicle),
    Id(i64),
}

impl VehicleRef {
    /// The referenced vehicle's id, regardless of representation.
    #[must_use]
    pub fn id(&self) -> i64 {
        match self {
            VehicleRef::Embedded(vehicle) => vehicle.id,
            VehicleRef::Id(id) => *id,
        }
    }

    /// The embedded vehicle, if the record carries one.
    #[must_use]
    pub fn vehicle(&self) -> Option<&Vehicle> {
        match self {
            VehicleRef::Embedded(vehicle) => Some(vehicle),
            VehicleRef::Id(_) => None,
        }
    }
}

/// Payload for the admin vehicle-create operation.
#[derive(Debug, Clone, Serialize)]
pub struct NewVehicle {
    pub brand: String,
    pub name: String,
    pub price: i64,
    pub fuel_type: FuelType,
    pub image_url: String,
    pub description: String,
}

/// One row of the per-brand inventory summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSummary {
    pub brand: String,
    pub total: u64,
}
