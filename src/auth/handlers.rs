//! Authentication handlers

use axum::extract::{Extension, Json};
use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};

use super::extractors::AuthedUser;
use super::models::{Claims, User};
use crate::common::{safe_email_log, ApiError, SharedState};

/// GET /api/me
/// Returns the current user and whether onboarding is still required
///
/// # Response
/// ```json
/// {
///   "user": { "id": "...", "email": "...", "name": "...", "req_hours": 486 },
///   "needsOnboarding": false
/// }
/// ```
pub async fn me_handler(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %authed.id, "Database error loading current user");
            ApiError::DatabaseError(e)
        })?;

    // Dev mode skips the lazy creation path, so fall back to the configured dev user
    let user = match user {
        Some(u) => u,
        None if state.dev_mode.is_enabled() => state.dev_mode.dev_user(),
        None => return Err(ApiError::NotFound("User not found".to_string())),
    };

    let resp = serde_json::json!({
        "needsOnboarding": user.needs_onboarding(),
        "user": user,
    });
    Ok(Json(resp))
}

/// POST /api/auth/logout
/// Tokens are issued by the identity provider, so logout is handled
/// client-side. This endpoint only confirms the request.
pub async fn logout_handler(authed: AuthedUser) -> Result<Json<serde_json::Value>, ApiError> {
    info!(
        user_id = %authed.id,
        email = %safe_email_log(&authed.email),
        "User logout successful"
    );
    let resp = serde_json::json!({
        "message": "Logout successful"
    });
    Ok(Json(resp))
}

// ---- Helper Functions ----

/// Resolve verified claims to a local user, creating the row on first login.
///
/// Lookup order is `sub`, then email. A new row takes `sub` as its id and
/// the provider's display name (or `""`) with no required hours.
pub async fn find_or_create_user(pool: &SqlitePool, claims: &Claims) -> Result<User, ApiError> {
    let by_id = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&claims.sub)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %claims.sub, "Database error during user lookup");
            ApiError::DatabaseError(e)
        })?;

    if let Some(user) = by_id {
        return Ok(user);
    }

    let Some(email) = claims.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
        warn!(user_id = %claims.sub, "Token carries no email and user does not exist");
        return Err(ApiError::Unauthorized("token missing email".into()));
    };

    let by_email = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                email = %safe_email_log(email),
                "Database error during user lookup by email"
            );
            ApiError::DatabaseError(e)
        })?;

    if let Some(user) = by_email {
        debug!(
            user_id = %user.id,
            email = %safe_email_log(email),
            "Found existing user by email"
        );
        return Ok(user);
    }

    info!(
        user_id = %claims.sub,
        email = %safe_email_log(email),
        "Creating user profile on first login"
    );

    // OR IGNORE: two concurrent first requests race to insert the same row
    sqlx::query("INSERT OR IGNORE INTO users (id, email, name, req_hours) VALUES (?, ?, ?, 0)")
        .bind(&claims.sub)
        .bind(email)
        .bind(claims.display_name().unwrap_or(""))
        .execute(pool)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                user_id = %claims.sub,
                "Database error inserting new user"
            );
            ApiError::DatabaseError(e)
        })?;

    // fetch back
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ? OR email = ?")
        .bind(&claims.sub)
        .bind(email)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                user_id = %claims.sub,
                "Database error fetching newly created user"
            );
            ApiError::DatabaseError(e)
        })
}
