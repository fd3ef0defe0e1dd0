mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚗 Vehicle Inventory Service");
    info!("============================");

    let config = EnvironmentConfig::from_env();

    let pool = match database::create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Failed to connect to the database: {}", e);
            return Err(e);
        }
    };

    database::run_migrations(&pool).await?;

    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Listening on http://{}", addr);
    info!("🚗 Vehicle endpoints:");
    info!("   POST   /api/vehicles - Create vehicle");
    info!("   GET    /api/vehicles - List vehicles");
    info!("   GET    /api/vehicles/available - List available vehicles");
    info!("   GET    /api/vehicles/status/:status - List vehicles by status");
    info!("   GET    /api/vehicles/:id - Get vehicle");
    info!("   PUT    /api/vehicles/:id - Update vehicle");
    info!("   DELETE /api/vehicles/:id - Delete vehicle");
    info!("   POST   /api/vehicles/:id/reserve - Reserve vehicle");
    info!("   POST   /api/vehicles/:id/release - Release reservation");
    info!("   POST   /api/vehicles/:id/mark-as-sold - Mark vehicle as sold");
    info!("   POST   /api/vehicles/:id/sale-status - Sale status push-back");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "inventory-service",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Graceful shutdown on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Termination signal received, shutting down...");
        },
    }
}
