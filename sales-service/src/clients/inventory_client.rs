//! HTTP client for the inventory service
//!
//! Used for the availability check on sale creation and the best-effort
//! status push-back on payment events.

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::models::sale::PaymentStatus;
use crate::utils::errors::AppError;

/// Vehicle fields the sales service cares about
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehicleSummary {
    pub id: Uuid,
    pub status: String,
    pub price: Decimal,
}

impl VehicleSummary {
    pub fn is_available(&self) -> bool {
        self.status == "available"
    }
}

#[derive(Clone)]
pub struct InventoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl InventoryClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    /// Fetch a vehicle from the inventory service.
    pub async fn get_vehicle(&self, vehicle_id: Uuid) -> Result<VehicleSummary, AppError> {
        let url = format!("{}/api/vehicles/{}", self.base_url, vehicle_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("inventory request failed: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                Err(AppError::NotFound(format!("vehicle '{}' not found", vehicle_id)))
            }
            status if !status.is_success() => Err(AppError::ExternalApi(format!(
                "inventory service returned status {}",
                status
            ))),
            _ => response
                .json::<VehicleSummary>()
                .await
                .map_err(|e| AppError::ExternalApi(format!("invalid inventory response: {}", e))),
        }
    }

    /// Push a sale payment status back to the inventory service so it can
    /// move the vehicle through its own state machine. Fire-and-forget at
    /// the call site; failures are returned for the caller to log.
    pub async fn notify_sale_status(
        &self,
        vehicle_id: Uuid,
        status: PaymentStatus,
    ) -> Result<(), AppError> {
        let url = format!("{}/api/vehicles/{}/sale-status", self.base_url, vehicle_id);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "status": status }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("inventory notification failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "inventory notification returned status {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_vehicle_deserializes_response() {
        let server = MockServer::start().await;
        let vehicle_id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path(format!("/api/vehicles/{}", vehicle_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": vehicle_id,
                "brand": "Honda",
                "model": "Civic",
                "year": 2023,
                "color": "silver",
                "price": "120000.00",
                "status": "available",
                "created_at": "2026-01-10T12:00:00Z",
                "updated_at": "2026-01-10T12:00:00Z"
            })))
            .mount(&server)
            .await;

        let client = InventoryClient::new(server.uri());
        let vehicle = client.get_vehicle(vehicle_id).await.unwrap();

        assert_eq!(vehicle.id, vehicle_id);
        assert!(vehicle.is_available());
    }

    #[tokio::test]
    async fn test_get_vehicle_maps_404_to_not_found() {
        let server = MockServer::start().await;
        let vehicle_id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path(format!("/api/vehicles/{}", vehicle_id)))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = InventoryClient::new(server.uri());
        let err = client.get_vehicle(vehicle_id).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_vehicle_maps_server_error_to_external_api() {
        let server = MockServer::start().await;
        let vehicle_id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path(format!("/api/vehicles/{}", vehicle_id)))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = InventoryClient::new(server.uri());
        let err = client.get_vehicle(vehicle_id).await.unwrap_err();

        assert!(matches!(err, AppError::ExternalApi(_)));
    }

    #[tokio::test]
    async fn test_notify_sale_status_posts_payment_status() {
        let server = MockServer::start().await;
        let vehicle_id = Uuid::new_v4();

        Mock::given(method("POST"))
            .and(path(format!("/api/vehicles/{}/sale-status", vehicle_id)))
            .and(body_json(serde_json::json!({ "status": "paid" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = InventoryClient::new(server.uri());
        client
            .notify_sale_status(vehicle_id, PaymentStatus::Paid)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_notify_sale_status_surfaces_failure() {
        let server = MockServer::start().await;
        let vehicle_id = Uuid::new_v4();

        Mock::given(method("POST"))
            .and(path(format!("/api/vehicles/{}/sale-status", vehicle_id)))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let client = InventoryClient::new(server.uri());
        let err = client
            .notify_sale_status(vehicle_id, PaymentStatus::Cancelled)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ExternalApi(_)));
    }
}
