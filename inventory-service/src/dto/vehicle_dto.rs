use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::{Vehicle, VehicleStatus};

// Request to create a vehicle
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    pub year: i32,

    #[validate(length(min = 1, max = 50))]
    pub color: String,

    pub price: Decimal,
}

// Request to update a vehicle; only supplied fields are applied
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    pub year: Option<i32>,

    #[validate(length(min = 1, max = 50))]
    pub color: Option<String>,

    pub price: Option<Decimal>,
}

/// Status push-back from the sales service. Payment statuses are mapped
/// onto vehicle statuses by the controller.
#[derive(Debug, Deserialize)]
pub struct SaleStatusRequest {
    pub status: SalePaymentStatus,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SalePaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

// Vehicle response for the API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: Decimal,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            color: vehicle.color,
            price: vehicle.price,
            status: vehicle.status,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}
