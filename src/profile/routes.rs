// src/profile/routes.rs

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{profile, required_hours};

pub fn profile_routes() -> Router {
    Router::new()
        // Onboarding / profile edit
        .route("/api/profile", put(profile::update_profile_handler))
        // Required-hours target
        .route(
            "/api/profile/required-hours",
            get(required_hours::get_required_hours).put(required_hours::set_required_hours),
        )
}
