use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::sale_controller::SaleController;
use crate::dto::sale_dto::{CreateSaleRequest, SaleResponse, UpdateSaleRequest};
use crate::dto::ApiResponse;
use crate::models::sale::PaymentStatus;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_sale_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_sale))
        .route("/", get(list_sales))
        .route("/status/:status", get(list_sales_by_status))
        .route("/payment/:payment_code", get(get_sale_by_payment_code))
        .route("/:id", get(get_sale))
        .route("/:id", put(update_sale))
        .route("/:id", delete(delete_sale))
        .route("/:id/mark-as-paid", patch(mark_sale_as_paid))
        .route("/:id/mark-as-cancelled", patch(mark_sale_as_cancelled))
}

fn controller(state: &AppState) -> SaleController {
    SaleController::new(state.pool.clone(), state.inventory.clone())
}

async fn create_sale(
    State(state): State<AppState>,
    Json(request): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SaleResponse>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaleResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn get_sale_by_payment_code(
    State(state): State<AppState>,
    Path(payment_code): Path<String>,
) -> Result<Json<SaleResponse>, AppError> {
    let response = controller(&state).get_by_payment_code(&payment_code).await?;
    Ok(Json(response))
}

async fn list_sales(State(state): State<AppState>) -> Result<Json<Vec<SaleResponse>>, AppError> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn list_sales_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<SaleResponse>>, AppError> {
    let status: PaymentStatus = status.parse().map_err(AppError::BadRequest)?;
    let response = controller(&state).list_by_status(status).await?;
    Ok(Json(response))
}

async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSaleRequest>,
) -> Result<Json<ApiResponse<SaleResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    controller(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_sale_as_paid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaleResponse>, AppError> {
    let response = controller(&state).mark_as_paid(id).await?;
    Ok(Json(response))
}

async fn mark_sale_as_cancelled(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaleResponse>, AppError> {
    let response = controller(&state).mark_as_cancelled(id).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    // Lazy pool: never connects as long as the request is rejected by
    // validation or the availability check before reaching the repository.
    // Conflict paths (duplicate payment_code, second active sale) hit the
    // repository first and need a live database, so they are not covered
    // here.
    fn test_state(inventory_url: &str) -> AppState {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/sales_test")
            .expect("lazy pool");
        AppState {
            pool,
            config: crate::config::environment::EnvironmentConfig {
                environment: "test".to_string(),
                host: "127.0.0.1".to_string(),
                port: 0,
                database_url: "postgres://localhost/sales_test".to_string(),
                inventory_service_url: inventory_url.to_string(),
            },
            inventory: crate::clients::inventory_client::InventoryClient::new(
                inventory_url.to_string(),
            ),
        }
    }

    fn app_with(inventory_url: &str) -> Router {
        create_sale_router().with_state(test_state(inventory_url))
    }

    fn app() -> Router {
        app_with("http://localhost:8080")
    }

    async fn post_json(uri: &str, body: serde_json::Value) -> StatusCode {
        post_json_with(app(), uri, body).await
    }

    async fn post_json_with(app: Router, uri: &str, body: serde_json::Value) -> StatusCode {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_create_rejects_short_cpf() {
        let status = post_json(
            "/",
            json!({
                "vehicle_id": uuid::Uuid::new_v4(),
                "buyer_cpf": "123.456.789",
                "price": "85000.00",
                "payment_code": "PAY-001"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_price() {
        let status = post_json(
            "/",
            json!({
                "vehicle_id": uuid::Uuid::new_v4(),
                "buyer_cpf": "123.456.789-09",
                "price": "0",
                "payment_code": "PAY-001"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_rejects_unavailable_vehicle() {
        let server = wiremock::MockServer::start().await;
        let vehicle_id = uuid::Uuid::new_v4();

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path(format!(
                "/api/vehicles/{}",
                vehicle_id
            )))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({
                "id": vehicle_id,
                "status": "reserved",
                "price": "85000.00"
            })))
            .mount(&server)
            .await;

        let status = post_json_with(
            app_with(&server.uri()),
            "/",
            json!({
                "vehicle_id": vehicle_id,
                "buyer_cpf": "123.456.789-09",
                "price": "85000.00",
                "payment_code": "PAY-001"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_vehicle() {
        let server = wiremock::MockServer::start().await;
        let vehicle_id = uuid::Uuid::new_v4();

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path(format!(
                "/api/vehicles/{}",
                vehicle_id
            )))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let status = post_json_with(
            app_with(&server.uri()),
            "/",
            json!({
                "vehicle_id": vehicle_id,
                "buyer_cpf": "123.456.789-09",
                "price": "85000.00",
                "payment_code": "PAY-001"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_by_status_rejects_unknown_status() {
        let request = Request::builder()
            .method("GET")
            .uri("/status/refunded")
            .body(Body::empty())
            .unwrap();
        let status = app().oneshot(request).await.unwrap().status();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
