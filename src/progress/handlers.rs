// src/progress/handlers.rs

use axum::extract::{Extension, Json};
use serde::Serialize;
use tracing::{debug, error, info};

use super::aggregator::{aggregate, day_blocks, share_text, DayBlock, ProgressSummary};
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, SharedState};
use crate::entries::adapter::normalize;
use crate::entries::queries::fetch_entries_by_user;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub summary: ProgressSummary,
    pub required_hours: u32,
    pub remaining_hours: f64,
    pub remaining_day_blocks: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocksResponse {
    pub total_day_blocks: u32,
    pub completed_day_blocks: u32,
    pub blocks: Vec<DayBlock>,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub text: String,
}

/// Load the user's entries and target, then aggregate
async fn summarize(state: &AppState, user_id: &str) -> Result<(ProgressSummary, u32), ApiError> {
    let required_hours = state.required_hours.get(user_id).await?;

    let rows = fetch_entries_by_user(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "Database error loading entries for progress");
            ApiError::DatabaseError(e)
        })?;

    let entries = normalize(rows);
    let summary = aggregate(&entries, required_hours);

    debug!(
        user_id = %user_id,
        entry_count = entries.len(),
        required_hours,
        completed_hours = summary.completed_hours,
        "Progress aggregated"
    );

    Ok((summary, required_hours))
}

/// GET /api/progress
///
/// # Response
/// ```json
/// {
///   "completedHours": 7.0,
///   "completionPercentage": 1,
///   "completedDayBlocks": 1,
///   "totalDayBlocks": 63,
///   "requiredHours": 500,
///   "remainingHours": 493.0,
///   "remainingDayBlocks": 62
/// }
/// ```
pub async fn get_progress(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<ProgressResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let (summary, required_hours) = summarize(&state, &authed.id).await?;

    info!(
        user_id = %authed.id,
        completion_percentage = summary.completion_percentage,
        "Progress retrieved"
    );

    Ok(Json(ProgressResponse {
        summary,
        required_hours,
        remaining_hours: summary.remaining_hours(required_hours),
        remaining_day_blocks: summary.remaining_day_blocks(),
    }))
}

/// GET /api/progress/blocks - Day-block grid
pub async fn get_blocks(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<BlocksResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let (summary, _) = summarize(&state, &authed.id).await?;

    Ok(Json(BlocksResponse {
        total_day_blocks: summary.total_day_blocks,
        completed_day_blocks: summary.completed_day_blocks,
        blocks: day_blocks(&summary),
    }))
}

/// GET /api/progress/share - Text summary for sharing
pub async fn get_share(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<ShareResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let (summary, required_hours) = summarize(&state, &authed.id).await?;

    Ok(Json(ShareResponse {
        text: share_text(&summary, required_hours),
    }))
}
