//! Vehicle model
//!
//! Contains the Vehicle struct, its status enum mapping to the
//! PostgreSQL ENUM `vehicle_status`, and the status transition rules.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Vehicle status - maps to the ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Reserved,
    Sold,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Reserved => "reserved",
            VehicleStatus::Sold => "sold",
        }
    }

    /// Allowed transitions. Sold is terminal.
    pub fn can_transition_to(self, next: VehicleStatus) -> bool {
        use VehicleStatus::*;
        matches!(
            (self, next),
            (Available, Reserved) | (Available, Sold) | (Reserved, Sold) | (Reserved, Available)
        )
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(VehicleStatus::Available),
            "reserved" => Ok(VehicleStatus::Reserved),
            "sold" => Ok(VehicleStatus::Sold),
            other => Err(format!("unknown vehicle status '{}'", other)),
        }
    }
}

/// Vehicle - maps to the vehicles table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
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

impl Vehicle {
    /// Apply a status transition, rejecting anything outside the allowed set.
    /// Touches updated_at on success.
    pub fn transition_to(&mut self, next: VehicleStatus) -> Result<(), AppError> {
        if !self.status.can_transition_to(next) {
            let message = if self.status == VehicleStatus::Sold {
                format!("vehicle already sold: cannot change status to '{}'", next)
            } else {
                format!(
                    "invalid status transition from '{}' to '{}'",
                    self.status, next
                )
            };
            return Err(AppError::BadRequest(message));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2022,
            color: "black".to_string(),
            price: Decimal::from(95000),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_available_can_be_reserved() {
        let mut v = vehicle(VehicleStatus::Available);
        assert!(v.transition_to(VehicleStatus::Reserved).is_ok());
        assert_eq!(v.status, VehicleStatus::Reserved);
    }

    #[test]
    fn test_available_can_be_sold() {
        let mut v = vehicle(VehicleStatus::Available);
        assert!(v.transition_to(VehicleStatus::Sold).is_ok());
        assert_eq!(v.status, VehicleStatus::Sold);
    }

    #[test]
    fn test_reserved_can_be_sold_or_released() {
        let mut v = vehicle(VehicleStatus::Reserved);
        assert!(v.transition_to(VehicleStatus::Available).is_ok());

        let mut v = vehicle(VehicleStatus::Reserved);
        assert!(v.transition_to(VehicleStatus::Sold).is_ok());
    }

    #[test]
    fn test_sold_is_terminal() {
        for next in [
            VehicleStatus::Available,
            VehicleStatus::Reserved,
            VehicleStatus::Sold,
        ] {
            let mut v = vehicle(VehicleStatus::Sold);
            let err = v.transition_to(next).unwrap_err();
            assert!(err.to_string().contains("already sold"));
            assert_eq!(v.status, VehicleStatus::Sold);
        }
    }

    #[test]
    fn test_transition_error_names_both_statuses() {
        let mut v = vehicle(VehicleStatus::Reserved);
        let err = v.transition_to(VehicleStatus::Reserved).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("reserved"));
    }

    #[test]
    fn test_transition_touches_updated_at() {
        let mut v = vehicle(VehicleStatus::Available);
        let before = v.updated_at;
        v.transition_to(VehicleStatus::Reserved).unwrap();
        assert!(v.updated_at >= before);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "available".parse::<VehicleStatus>().unwrap(),
            VehicleStatus::Available
        );
        assert!("scrapped".parse::<VehicleStatus>().is_err());
    }
}
