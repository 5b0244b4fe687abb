//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/logout` - Logout (client-side token removal)
/// - `GET /api/me` - Current user and onboarding status
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/logout", post(handlers::logout_handler))
        .route("/api/me", get(handlers::me_handler))
}
