use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, SalePaymentStatus, UpdateVehicleRequest, VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::{validate_not_blank, validate_price, validate_year};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if validate_not_blank(&request.brand).is_err() {
            return Err(validation_error("brand", "brand must not be blank"));
        }
        if validate_not_blank(&request.model).is_err() {
            return Err(validation_error("model", "model must not be blank"));
        }
        if validate_not_blank(&request.color).is_err() {
            return Err(validation_error("color", "color must not be blank"));
        }
        if validate_year(request.year).is_err() {
            return Err(validation_error("year", "year is out of range"));
        }
        if validate_price(request.price).is_err() {
            return Err(validation_error("price", "price must be greater than zero"));
        }

        let vehicle = self
            .repository
            .create(
                request.brand.trim().to_string(),
                request.model.trim().to_string(),
                request.year,
                request.color.trim().to_string(),
                request.price,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "vehicle created".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("vehicle '{}' not found", id)))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_all().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn list_by_status(
        &self,
        status: VehicleStatus,
    ) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_by_status(status).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        // Field updates are only allowed while the vehicle is still available
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("vehicle '{}' not found", id)))?;

        if current.status != VehicleStatus::Available {
            return Err(AppError::BadRequest(format!(
                "cannot update a vehicle with status '{}'",
                current.status
            )));
        }

        if let Some(ref brand) = request.brand {
            if validate_not_blank(brand).is_err() {
                return Err(validation_error("brand", "brand must not be blank"));
            }
        }
        if let Some(ref model) = request.model {
            if validate_not_blank(model).is_err() {
                return Err(validation_error("model", "model must not be blank"));
            }
        }
        if let Some(ref color) = request.color {
            if validate_not_blank(color).is_err() {
                return Err(validation_error("color", "color must not be blank"));
            }
        }
        if let Some(year) = request.year {
            if validate_year(year).is_err() {
                return Err(validation_error("year", "year is out of range"));
            }
        }
        if let Some(price) = request.price {
            if validate_price(price).is_err() {
                return Err(validation_error("price", "price must be greater than zero"));
            }
        }

        let vehicle = self
            .repository
            .update(
                id,
                request.brand.map(|b| b.trim().to_string()),
                request.model.map(|m| m.trim().to_string()),
                request.year,
                request.color.map(|c| c.trim().to_string()),
                request.price,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "vehicle updated".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    pub async fn reserve(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        self.transition(id, VehicleStatus::Reserved).await
    }

    pub async fn release(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        self.transition(id, VehicleStatus::Available).await
    }

    pub async fn mark_as_sold(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        self.transition(id, VehicleStatus::Sold).await
    }

    /// Push-back from the sales service: map a payment status onto the
    /// corresponding vehicle transition.
    pub async fn apply_sale_status(
        &self,
        id: Uuid,
        status: SalePaymentStatus,
    ) -> Result<VehicleResponse, AppError> {
        let target = match status {
            SalePaymentStatus::Pending => VehicleStatus::Reserved,
            SalePaymentStatus::Paid => VehicleStatus::Sold,
            SalePaymentStatus::Cancelled => VehicleStatus::Available,
        };
        self.transition(id, target).await
    }

    async fn transition(
        &self,
        id: Uuid,
        next: VehicleStatus,
    ) -> Result<VehicleResponse, AppError> {
        let mut vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("vehicle '{}' not found", id)))?;

        vehicle.transition_to(next)?;

        let updated = self.repository.update_status(id, next).await?;
        Ok(updated.into())
    }
}
