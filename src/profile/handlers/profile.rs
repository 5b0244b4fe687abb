// src/profile/handlers/profile.rs

use axum::extract::{Extension, Json};
use tracing::{error, info, warn};

use super::super::models::UpdateProfileRequest;
use super::super::validators::ProfileValidator;
use crate::auth::{AuthedUser, User};
use crate::common::{ApiError, SharedState, Validator};

/// PUT /api/profile - Onboarding and profile edit
///
/// # Request Body
/// ```json
/// { "name": "Juan Dela Cruz", "reqHours": 486 }
/// ```
pub async fn update_profile_handler(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    info!(user_id = %authed.id, "Profile update request received");

    let validation_result = ProfileValidator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            user_id = %authed.id,
            errors = ?validation_result.errors,
            "Profile validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let result = sqlx::query(
        r#"
        UPDATE users SET
            name = COALESCE(?, name),
            req_hours = COALESCE(?, req_hours)
        WHERE id = ?
        "#,
    )
    .bind(request.name.as_deref().map(str::trim))
    .bind(request.req_hours)
    .bind(&authed.id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            user_id = %authed.id,
            "Database error updating profile"
        );
        ApiError::DatabaseError(e)
    })?;

    if result.rows_affected() == 0 {
        warn!(user_id = %authed.id, "Profile update for missing user");
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    // req_hours may have changed behind the cache
    state.required_hours.invalidate(&authed.id).await;

    // Fetch the updated user
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_one(&state.db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                user_id = %authed.id,
                "Database error fetching updated profile"
            );
            ApiError::DatabaseError(e)
        })?;

    info!(user_id = %authed.id, "Profile updated successfully");

    Ok(Json(serde_json::json!({
        "needsOnboarding": user.needs_onboarding(),
        "user": user,
    })))
}
