// Shared fixtures for handler tests: in-memory database, router and tokens

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

use super::dev_mode::DevModeConfig;
use super::migrations::run_migrations;
use super::{AppState, SharedState};
use crate::services::RequiredHoursService;

pub const TEST_SECRET: &str = "test_secret_key";

/// Single-connection in-memory pool; every connection would otherwise get
/// its own empty database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub fn test_state(pool: SqlitePool, dev_mode: DevModeConfig) -> SharedState {
    Arc::new(RwLock::new(AppState {
        db: pool.clone(),
        jwt_secret: TEST_SECRET.to_string(),
        jwt_audience: None,
        dev_mode,
        required_hours: Arc::new(RequiredHoursService::new(pool, 300)),
    }))
}

/// Router with production layers over a fresh database
pub async fn test_app() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    let app = crate::build_app(
        test_state(pool.clone(), DevModeConfig::default()),
        &["http://localhost:3000".to_string()],
    );
    (app, pool)
}

/// HS256 token as the identity provider would issue it
pub fn token_for(sub: &str, email: &str) -> String {
    let claims = serde_json::json!({
        "sub": sub,
        "email": email,
        "exp": 9999999999u64,
        "user_metadata": { "full_name": "Test Intern" },
    });
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode token")
}

/// Issue one request and decode the reply. Empty bodies become `Value::Null`,
/// non-JSON bodies (axum rejections) a `Value::String`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}
