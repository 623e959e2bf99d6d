use std::sync::Arc;

use reqwest::Client as HttpClient;
use sqlx::SqlitePool;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub http: HttpClient,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates the application state around a migrated pool
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            pool,
            http: HttpClient::new(),
            config: Arc::new(config),
        }
    }
}
