//! Shared application state
//!
//! State handed to every Axum handler through the router.

use sqlx::PgPool;

use crate::clients::inventory_client::InventoryClient;
use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub inventory: InventoryClient,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let inventory = InventoryClient::new(config.inventory_service_url.clone());
        Self {
            pool,
            config,
            inventory,
        }
    }
}
