use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::clients::inventory_client::InventoryClient;
use crate::dto::sale_dto::{CreateSaleRequest, SaleResponse, UpdateSaleRequest};
use crate::dto::ApiResponse;
use crate::models::sale::PaymentStatus;
use crate::repositories::sale_repository::SaleRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::{normalize_cpf, validate_not_blank, validate_price};

pub struct SaleController {
    repository: SaleRepository,
    inventory: InventoryClient,
}

impl SaleController {
    pub fn new(pool: PgPool, inventory: InventoryClient) -> Self {
        Self {
            repository: SaleRepository::new(pool),
            inventory,
        }
    }

    pub async fn create(
        &self,
        request: CreateSaleRequest,
    ) -> Result<ApiResponse<SaleResponse>, AppError> {
        request.validate()?;

        let buyer_cpf = normalize_cpf(&request.buyer_cpf)
            .map_err(|_| validation_error("buyer_cpf", "CPF must contain exactly 11 digits"))?;

        if validate_price(request.price).is_err() {
            return Err(validation_error("price", "price must be greater than zero"));
        }
        if validate_not_blank(&request.payment_code).is_err() {
            return Err(validation_error(
                "payment_code",
                "payment code must not be blank",
            ));
        }
        let payment_code = request.payment_code.trim().to_string();

        // Availability check against the inventory service. A 404 there
        // surfaces as 404 here; any other status blocks the sale.
        let vehicle = self.inventory.get_vehicle(request.vehicle_id).await?;
        if !vehicle.is_available() {
            return Err(AppError::BadRequest(format!(
                "vehicle '{}' is not available for sale (status '{}')",
                vehicle.id, vehicle.status
            )));
        }

        if let Some(existing) = self
            .repository
            .find_active_by_vehicle(request.vehicle_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "vehicle '{}' already has a sale ('{}')",
                request.vehicle_id, existing.id
            )));
        }

        if self.repository.payment_code_exists(&payment_code).await? {
            return Err(AppError::Conflict(format!(
                "payment code '{}' already exists",
                payment_code
            )));
        }

        let sale = self
            .repository
            .create(request.vehicle_id, buyer_cpf, request.price, payment_code)
            .await?;

        // Best-effort reservation; a failure leaves the sale in place.
        if let Err(e) = self
            .inventory
            .notify_sale_status(sale.vehicle_id, PaymentStatus::Pending)
            .await
        {
            warn!(
                "Failed to notify inventory about sale '{}' creation: {}",
                sale.id, e
            );
        }

        Ok(ApiResponse::success_with_message(
            sale.into(),
            "sale created".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<SaleResponse, AppError> {
        let sale = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("sale '{}' not found", id)))?;

        Ok(sale.into())
    }

    pub async fn get_by_payment_code(&self, payment_code: &str) -> Result<SaleResponse, AppError> {
        let sale = self
            .repository
            .find_by_payment_code(payment_code)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("sale with payment code '{}' not found", payment_code))
            })?;

        Ok(sale.into())
    }

    pub async fn list(&self) -> Result<Vec<SaleResponse>, AppError> {
        let sales = self.repository.find_all().await?;
        Ok(sales.into_iter().map(SaleResponse::from).collect())
    }

    pub async fn list_by_status(
        &self,
        status: PaymentStatus,
    ) -> Result<Vec<SaleResponse>, AppError> {
        let sales = self.repository.find_by_status(status).await?;
        Ok(sales.into_iter().map(SaleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateSaleRequest,
    ) -> Result<ApiResponse<SaleResponse>, AppError> {
        request.validate()?;

        // Field updates are only allowed while the sale is still pending
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("sale '{}' not found", id)))?;

        if current.payment_status != PaymentStatus::Pending {
            return Err(AppError::BadRequest(format!(
                "cannot update a sale with payment status '{}'",
                current.payment_status
            )));
        }

        let buyer_cpf = match request.buyer_cpf {
            Some(ref cpf) => Some(normalize_cpf(cpf).map_err(|_| {
                validation_error("buyer_cpf", "CPF must contain exactly 11 digits")
            })?),
            None => None,
        };
        if let Some(price) = request.price {
            if validate_price(price).is_err() {
                return Err(validation_error("price", "price must be greater than zero"));
            }
        }

        let sale = self.repository.update(id, buyer_cpf, request.price).await?;

        Ok(ApiResponse::success_with_message(
            sale.into(),
            "sale updated".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    pub async fn mark_as_paid(&self, id: Uuid) -> Result<SaleResponse, AppError> {
        self.transition(id, PaymentStatus::Paid).await
    }

    pub async fn mark_as_cancelled(&self, id: Uuid) -> Result<SaleResponse, AppError> {
        self.transition(id, PaymentStatus::Cancelled).await
    }

    async fn transition(&self, id: Uuid, next: PaymentStatus) -> Result<SaleResponse, AppError> {
        let mut sale = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("sale '{}' not found", id)))?;

        sale.transition_to(next)?;

        let updated = self.repository.update_status(id, next).await?;

        // Best-effort push-back: paid marks the vehicle sold, cancelled
        // releases the reservation. Failures are logged, never rolled back.
        if let Err(e) = self
            .inventory
            .notify_sale_status(updated.vehicle_id, next)
            .await
        {
            warn!(
                "Failed to notify inventory about sale '{}' status '{}': {}",
                updated.id, next, e
            );
        }

        Ok(updated.into())
    }
}
