use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::sale::{PaymentStatus, Sale};
use crate::utils::errors::AppError;

pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_id: Uuid,
        buyer_cpf: String,
        price: Decimal,
        payment_code: String,
    ) -> Result<Sale, AppError> {
        let now = Utc::now();
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (id, vehicle_id, buyer_cpf, price, payment_code, payment_status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'pending', $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(buyer_cpf)
        .bind(price)
        .bind(payment_code)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(sale)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    pub async fn find_all(&self) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    pub async fn find_by_status(&self, status: PaymentStatus) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT * FROM sales WHERE payment_status = $1 ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    pub async fn find_by_payment_code(&self, payment_code: &str) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE payment_code = $1")
            .bind(payment_code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Latest non-cancelled sale for a vehicle, if any. A cancelled sale
    /// does not block the vehicle from being sold again.
    pub async fn find_active_by_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT * FROM sales
            WHERE vehicle_id = $1 AND payment_status != 'cancelled'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    pub async fn payment_code_exists(&self, payment_code: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sales WHERE payment_code = $1)")
                .bind(payment_code)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Partial update: missing fields keep their current value.
    pub async fn update(
        &self,
        id: Uuid,
        buyer_cpf: Option<String>,
        price: Option<Decimal>,
    ) -> Result<Sale, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("sale '{}' not found", id)))?;

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET buyer_cpf = $2, price = $3, updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(buyer_cpf.unwrap_or(current.buyer_cpf))
        .bind(price.unwrap_or(current.price))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(sale)
    }

    pub async fn update_status(&self, id: Uuid, status: PaymentStatus) -> Result<Sale, AppError> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET payment_status = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("sale '{}' not found", id)))?;

        Ok(sale)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("sale '{}' not found", id)));
        }

        Ok(())
    }
}
