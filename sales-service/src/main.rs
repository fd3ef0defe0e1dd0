mod clients;
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

    info!("💰 Vehicle Sales Service");
    info!("========================");

    let config = EnvironmentConfig::from_env();

    let pool = match database::create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Failed to connect to the database: {}", e);
            return Err(e);
        }
    };

    database::run_migrations(&pool).await?;

    info!("🔗 Inventory service at {}", config.inventory_service_url);

    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/sales", routes::sale_routes::create_sale_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Listening on http://{}", addr);
    info!("💰 Sale endpoints:");
    info!("   POST   /api/sales - Create sale");
    info!("   GET    /api/sales - List sales");
    info!("   GET    /api/sales/status/:status - List sales by payment status");
    info!("   GET    /api/sales/payment/:payment_code - Get sale by payment code");
    info!("   GET    /api/sales/:id - Get sale");
    info!("   PUT    /api/sales/:id - Update sale");
    info!("   DELETE /api/sales/:id - Delete sale");
    info!("   PATCH  /api/sales/:id/mark-as-paid - Mark sale as paid");
    info!("   PATCH  /api/sales/:id/mark-as-cancelled - Mark sale as cancelled");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "sales-service",
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
