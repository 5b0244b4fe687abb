// src/profile/handlers/required_hours.rs

use axum::extract::{Extension, Json};
use tracing::{info, warn};

use super::super::models::RequiredHoursPayload;
use super::super::validators::RequiredHoursValidator;
use crate::auth::AuthedUser;
use crate::common::{ApiError, SharedState, Validator};

/// GET /api/profile/required-hours
pub async fn get_required_hours(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<RequiredHoursPayload>, ApiError> {
    let state = state_lock.read().await.clone();

    let hours = state.required_hours.get(&authed.id).await?;

    Ok(Json(RequiredHoursPayload {
        required_hours: i64::from(hours),
    }))
}

/// PUT /api/profile/required-hours
pub async fn set_required_hours(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Json(payload): Json<RequiredHoursPayload>,
) -> Result<Json<RequiredHoursPayload>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation_result = RequiredHoursValidator.validate(&payload);
    if !validation_result.is_valid {
        warn!(
            user_id = %authed.id,
            errors = ?validation_result.errors,
            "Required hours validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    // Validated to 1..=MAX_REQUIRED_HOURS
    let hours = u32::try_from(payload.required_hours)
        .map_err(|_| ApiError::BadRequest("requiredHours out of range".to_string()))?;

    let user = state.required_hours.set(&authed.id, hours).await?;

    info!(user_id = %user.id, hours, "Required hours saved");

    Ok(Json(RequiredHoursPayload {
        required_hours: user.req_hours,
    }))
}
