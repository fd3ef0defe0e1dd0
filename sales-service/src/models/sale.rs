//! Sale model
//!
//! Contains the Sale struct, its payment status enum mapping to the
//! PostgreSQL ENUM `payment_status`, and the status transition rules.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Payment status - maps to the ENUM payment_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    /// Allowed transitions. Paid and cancelled are terminal.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!((self, next), (Pending, Paid) | (Pending, Cancelled))
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "cancelled" => Ok(PaymentStatus::Cancelled),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

/// Sale - maps to the sales table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sale {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub buyer_cpf: String,
    pub price: Decimal,
    pub payment_code: String,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    /// Apply a payment status transition, rejecting anything outside the
    /// allowed set. Touches updated_at on success.
    pub fn transition_to(&mut self, next: PaymentStatus) -> Result<(), AppError> {
        if !self.payment_status.can_transition_to(next) {
            return Err(AppError::BadRequest(format!(
                "invalid payment status transition from '{}' to '{}'",
                self.payment_status, next
            )));
        }
        self.payment_status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(status: PaymentStatus) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            buyer_cpf: "12345678909".to_string(),
            price: Decimal::from(85000),
            payment_code: "PAY-001".to_string(),
            payment_status: status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_pending_can_be_paid() {
        let mut s = sale(PaymentStatus::Pending);
        assert!(s.transition_to(PaymentStatus::Paid).is_ok());
        assert_eq!(s.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_pending_can_be_cancelled() {
        let mut s = sale(PaymentStatus::Pending);
        assert!(s.transition_to(PaymentStatus::Cancelled).is_ok());
        assert_eq!(s.payment_status, PaymentStatus::Cancelled);
    }

    #[test]
    fn test_paid_is_terminal() {
        for next in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Cancelled,
        ] {
            let mut s = sale(PaymentStatus::Paid);
            let err = s.transition_to(next).unwrap_err();
            assert!(err.to_string().contains("paid"));
            assert_eq!(s.payment_status, PaymentStatus::Paid);
        }
    }

    #[test]
    fn test_cancelled_is_terminal() {
        for next in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Cancelled,
        ] {
            let mut s = sale(PaymentStatus::Cancelled);
            assert!(s.transition_to(next).is_err());
            assert_eq!(s.payment_status, PaymentStatus::Cancelled);
        }
    }

    #[test]
    fn test_transition_error_names_both_statuses() {
        let mut s = sale(PaymentStatus::Cancelled);
        let err = s.transition_to(PaymentStatus::Paid).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("cancelled"));
        assert!(msg.contains("paid"));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "pending".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Pending
        );
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }
}
