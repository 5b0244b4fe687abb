// src/progress/routes.rs

use axum::{routing::get, Router};

use super::handlers;

pub fn progress_routes() -> Router {
    Router::new()
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/progress/blocks", get(handlers::get_blocks))
        .route("/api/progress/share", get(handlers::get_share))
}
