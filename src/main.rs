// src/main.rs
use axum::{extract::Extension, middleware, routing::get, Json, Router};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod auth;
mod common;
mod entries;
mod logging_middleware;
mod profile;
mod progress;
mod services;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use common::dev_mode::{ensure_dev_user, print_dev_mode_status};
use common::{AppConfig, AppState, SharedState};
use services::RequiredHoursService;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let config = AppConfig::from_env()?;
    print_dev_mode_status(&config.dev_mode);

    if config.jwt_audience.is_none() && !config.dev_mode.is_enabled() {
        warn!("JWT_AUDIENCE not set, token audience will not be checked");
    }

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = config.database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    // Run database migrations
    common::migrations::run_migrations(&pool).await?;

    if config.dev_mode.is_enabled() {
        ensure_dev_user(&pool, &config.dev_mode).await?;
    }

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let required_hours = Arc::new(RequiredHoursService::new(
        pool.clone(),
        config.required_hours_cache_ttl_secs,
    ));
    info!(
        ttl_secs = config.required_hours_cache_ttl_secs,
        "RequiredHoursService initialized"
    );

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let app_state = AppState {
        db: pool,
        jwt_secret: config.jwt_secret.clone(),
        jwt_audience: config.jwt_audience.clone(),
        dev_mode: config.dev_mode.clone(),
        required_hours,
    };

    let shared = Arc::new(RwLock::new(app_state));
    let app = build_app(shared, &config.cors_origins);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// GET /api/health
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================================
// ROUTER COMPOSITION
// ============================================================================

pub fn build_app(shared: SharedState, cors_origins: &[String]) -> Router {
    let origins: Vec<axum::http::HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    Router::new()
        .route("/api/health", get(health_handler))
        // ====================================================================
        // AUTHENTICATION ROUTES
        // ====================================================================
        .merge(auth::auth_routes())
        // ====================================================================
        // PROFILE ROUTES (Onboarding, Required hours)
        // ====================================================================
        .merge(profile::profile_routes())
        // ====================================================================
        // ENTRY ROUTES
        // ====================================================================
        .merge(entries::entries_routes())
        // ====================================================================
        // PROGRESS ROUTES (Summary, Day blocks, Share)
        // ====================================================================
        .merge(progress::progress_routes())
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        // Add request/response body logging in debug mode
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(shared))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                    axum::http::HeaderName::from_static("x-request-id"),
                ])
                .allow_credentials(true),
        )
        .layer(TraceLayer::new_for_http())
}
