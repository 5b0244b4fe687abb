// src/entries/handlers.rs

use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};
use tracing::{debug, error, info, warn};

use super::adapter::normalize;
use super::edit_flow::EditFlow;
use super::models::{
    EntryRequest, EntryResponse, ListEntriesQuery, NormalizedEntry, SortOrder, TimeEntry,
};
use super::queries::{fetch_entries_by_user, fetch_owned_entry};
use super::validators::EntryValidator;
use crate::auth::AuthedUser;
use crate::common::{ApiError, SharedState, Validator};

fn validate_and_normalize(
    authed: &AuthedUser,
    request: &EntryRequest,
) -> Result<NormalizedEntry, ApiError> {
    let validation_result = EntryValidator.validate(request);
    if !validation_result.is_valid {
        warn!(
            user_id = %authed.id,
            errors = ?validation_result.errors,
            "Entry validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    request
        .normalized()
        .ok_or_else(|| ApiError::ValidationError("entry could not be normalized".to_string()))
}

fn entry_not_found() -> ApiError {
    ApiError::NotFound("Entry not found".to_string())
}

/// GET /api/entries - List the authenticated user's entries
///
/// `?order=desc` (default) puts the most recent entry first.
pub async fn list_entries(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Query(query): Query<ListEntriesQuery>,
) -> Result<Json<Vec<EntryResponse>>, ApiError> {
    let state = state_lock.read().await.clone();

    info!(user_id = %authed.id, order = ?query.order, "Fetching entries");

    let rows = fetch_entries_by_user(&state.db, &authed.id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %authed.id, "Database error fetching entries");
            ApiError::DatabaseError(e)
        })?;

    let mut entries = normalize(rows);
    if query.order == SortOrder::Desc {
        entries.reverse();
    }

    debug!(
        user_id = %authed.id,
        entry_count = entries.len(),
        "Successfully fetched entries"
    );

    Ok(Json(entries.iter().map(EntryResponse::from).collect()))
}

/// GET /api/entries/:id - Fetch one entry
pub async fn get_entry(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(entry_id): Path<i64>,
) -> Result<Json<EntryResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let row = fetch_owned_entry(&state.db, entry_id, &authed.id)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                user_id = %authed.id,
                entry_id,
                "Database error fetching entry"
            );
            ApiError::DatabaseError(e)
        })?
        .ok_or_else(entry_not_found)?;

    Ok(Json(EntryResponse::from(&TimeEntry::from(row))))
}

/// POST /api/entries - Record a new entry
pub async fn create_entry(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Json(request): Json<EntryRequest>,
) -> Result<(StatusCode, Json<EntryResponse>), ApiError> {
    let state = state_lock.read().await.clone();

    info!(
        user_id = %authed.id,
        date = %request.date,
        "Creating new entry"
    );

    let entry = validate_and_normalize(&authed, &request)?;

    let result = sqlx::query(
        r#"
        INSERT INTO entries (date, time_in, time_out, break_time, note, created_by, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, datetime('now'), datetime('now'))
        "#,
    )
    .bind(entry.date.format("%Y-%m-%d").to_string())
    .bind(&entry.time_in)
    .bind(&entry.time_out)
    .bind(&entry.break_time)
    .bind(entry.note.as_deref())
    .bind(&authed.id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, user_id = %authed.id, "Database error creating entry");
        ApiError::DatabaseError(e)
    })?;

    let entry_id = result.last_insert_rowid();

    let row = fetch_owned_entry(&state.db, entry_id, &authed.id)
        .await
        .map_err(|e| {
            error!(error = %e, entry_id, "Database error fetching created entry");
            ApiError::DatabaseError(e)
        })?
        .ok_or_else(|| ApiError::InternalServer("created entry vanished".to_string()))?;

    info!(user_id = %authed.id, entry_id, "Entry created successfully");

    Ok((
        StatusCode::CREATED,
        Json(EntryResponse::from(&TimeEntry::from(row))),
    ))
}

/// PUT /api/entries/:id - Replace date, times, break and note of an entry
pub async fn update_entry(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(entry_id): Path<i64>,
    Json(request): Json<EntryRequest>,
) -> Result<Json<EntryResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    info!(user_id = %authed.id, entry_id, "Updating entry");

    let mut flow = EditFlow::new();
    let transition_error = |e: super::edit_flow::InvalidTransition| {
        ApiError::InternalServer(format!("edit flow: {}", e))
    };
    flow.begin(entry_id).map_err(transition_error)?;

    let entry = match validate_and_normalize(&authed, &request) {
        Ok(entry) => entry,
        Err(e) => {
            flow.cancel().map_err(transition_error)?;
            return Err(e);
        }
    };

    // Check if the entry exists and belongs to the user
    let existing = fetch_owned_entry(&state.db, entry_id, &authed.id)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                user_id = %authed.id,
                entry_id,
                "Database error checking entry ownership"
            );
            ApiError::DatabaseError(e)
        })?;

    if existing.is_none() {
        flow.cancel().map_err(transition_error)?;
        warn!(user_id = %authed.id, entry_id, "Entry not found or access denied");
        return Err(entry_not_found());
    }

    flow.submit().map_err(transition_error)?;

    let outcome = sqlx::query(
        r#"
        UPDATE entries
        SET date = ?,
            time_in = ?,
            time_out = ?,
            break_time = ?,
            note = ?,
            updated_at = datetime('now')
        WHERE id = ? AND created_by = ?
        "#,
    )
    .bind(entry.date.format("%Y-%m-%d").to_string())
    .bind(&entry.time_in)
    .bind(&entry.time_out)
    .bind(&entry.break_time)
    .bind(entry.note.as_deref())
    .bind(entry_id)
    .bind(&authed.id)
    .execute(&state.db)
    .await;

    match outcome {
        Ok(result) if result.rows_affected() == 1 => {
            flow.succeed().map_err(transition_error)?;
        }
        Ok(_) => {
            // Deleted between the ownership check and the update
            flow.fail("entry disappeared").map_err(transition_error)?;
            return Err(entry_not_found());
        }
        Err(e) => {
            flow.fail(e.to_string()).map_err(transition_error)?;
            error!(
                error = %e,
                user_id = %authed.id,
                entry_id,
                state = flow.state().name(),
                "Database error updating entry"
            );
            return Err(ApiError::DatabaseError(e));
        }
    }

    let row = fetch_owned_entry(&state.db, entry_id, &authed.id)
        .await
        .map_err(|e| {
            error!(error = %e, entry_id, "Database error fetching updated entry");
            ApiError::DatabaseError(e)
        })?
        .ok_or_else(entry_not_found)?;

    info!(user_id = %authed.id, entry_id, "Entry updated successfully");

    Ok(Json(EntryResponse::from(&TimeEntry::from(row))))
}

/// DELETE /api/entries/:id - Delete an entry
pub async fn delete_entry(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(entry_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let state = state_lock.read().await.clone();

    info!(user_id = %authed.id, entry_id, "Deleting entry");

    // Delete the entry (only if it belongs to the user)
    let result = sqlx::query("DELETE FROM entries WHERE id = ? AND created_by = ?")
        .bind(entry_id)
        .bind(&authed.id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                user_id = %authed.id,
                entry_id,
                "Database error deleting entry"
            );
            ApiError::DatabaseError(e)
        })?;

    if result.rows_affected() == 0 {
        warn!(
            user_id = %authed.id,
            entry_id,
            "Entry not found or access denied for deletion"
        );
        return Err(entry_not_found());
    }

    info!(user_id = %authed.id, entry_id, "Entry deleted successfully");

    Ok(StatusCode::NO_CONTENT)
}
