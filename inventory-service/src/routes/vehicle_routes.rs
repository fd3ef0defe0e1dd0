use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, SaleStatusRequest, UpdateVehicleRequest, VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::models::vehicle::VehicleStatus;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/available", get(list_available_vehicles))
        .route("/status/:status", get(list_vehicles_by_status))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
        .route("/:id/reserve", post(reserve_vehicle))
        .route("/:id/release", post(release_vehicle))
        .route("/:id/mark-as-sold", post(mark_vehicle_as_sold))
        .route("/:id/sale-status", post(apply_sale_status))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn list_available_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list_by_status(VehicleStatus::Available).await?;
    Ok(Json(response))
}

async fn list_vehicles_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let status: VehicleStatus = status.parse().map_err(AppError::BadRequest)?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list_by_status(status).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reserve_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.reserve(id).await?;
    Ok(Json(response))
}

async fn release_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.release(id).await?;
    Ok(Json(response))
}

async fn mark_vehicle_as_sold(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.mark_as_sold(id).await?;
    Ok(Json(response))
}

async fn apply_sale_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SaleStatusRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.apply_sale_status(id, request.status).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    // Lazy pool: never connects as long as the request fails validation
    // before reaching the repository.
    fn test_state() -> AppState {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/inventory_test")
            .expect("lazy pool");
        AppState {
            pool,
            config: crate::config::environment::EnvironmentConfig {
                environment: "test".to_string(),
                host: "127.0.0.1".to_string(),
                port: 0,
                database_url: "postgres://localhost/inventory_test".to_string(),
            },
        }
    }

    fn app() -> Router {
        create_vehicle_router().with_state(test_state())
    }

    async fn post_json(uri: &str, body: serde_json::Value) -> StatusCode {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_price() {
        let status = post_json(
            "/",
            json!({
                "brand": "Fiat",
                "model": "Uno",
                "year": 2010,
                "color": "red",
                "price": "-1.00"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_brand() {
        let status = post_json(
            "/",
            json!({
                "brand": "   ",
                "model": "Uno",
                "year": 2010,
                "color": "red",
                "price": "30000.00"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_rejects_year_before_1886() {
        let status = post_json(
            "/",
            json!({
                "brand": "Fiat",
                "model": "Uno",
                "year": 1700,
                "color": "red",
                "price": "30000.00"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_list_by_status_rejects_unknown_status() {
        let request = Request::builder()
            .method("GET")
            .uri("/status/scrapped")
            .body(Body::empty())
            .unwrap();
        let status = app().oneshot(request).await.unwrap().status();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
