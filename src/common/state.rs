// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::common::dev_mode::DevModeConfig;
use crate::services::RequiredHoursService;

/// Application state containing database pool, services, and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_secret: String,
    pub jwt_audience: Option<String>,
    pub dev_mode: DevModeConfig,
    pub required_hours: Arc<RequiredHoursService>,
}

/// Handle passed to handlers through `Extension`
pub type SharedState = Arc<RwLock<AppState>>;
