// src/entries/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Time entry routes. Every route requires an authenticated user and only
/// ever touches that user's rows.
pub fn entries_routes() -> Router {
    Router::new()
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/api/entries/:id",
            get(handlers::get_entry)
                .put(handlers::update_entry)
                .delete(handlers::delete_entry),
        )
}
