use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::sale::{PaymentStatus, Sale};

// Request to create a sale
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSaleRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 11, max = 14))]
    pub buyer_cpf: String,

    pub price: Decimal,

    #[validate(length(min = 1, max = 100))]
    pub payment_code: String,
}

// Request to update a sale; only supplied fields are applied
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSaleRequest {
    #[validate(length(min = 11, max = 14))]
    pub buyer_cpf: Option<String>,

    pub price: Option<Decimal>,
}

// Sale response for the API
#[derive(Debug, Serialize)]
pub struct SaleResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub buyer_cpf: String,
    pub price: Decimal,
    pub payment_code: String,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Sale> for SaleResponse {
    fn from(sale: Sale) -> Self {
        Self {
            id: sale.id,
            vehicle_id: sale.vehicle_id,
            buyer_cpf: sale.buyer_cpf,
            price: sale.price,
            payment_code: sale.payment_code,
            payment_status: sale.payment_status,
            created_at: sale.created_at,
            updated_at: sale.updated_at,
        }
    }
}
