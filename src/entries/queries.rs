// src/entries/queries.rs
//! Owner-scoped reads shared by the entry and progress handlers.

use sqlx::SqlitePool;

use super::models::EntryRow;

/// All entries owned by `user_id`, oldest first (ascending id)
pub async fn fetch_entries_by_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<EntryRow>, sqlx::Error> {
    sqlx::query_as::<_, EntryRow>("SELECT * FROM entries WHERE created_by = ? ORDER BY id ASC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// A single entry, only if `user_id` owns it
pub async fn fetch_owned_entry(
    pool: &SqlitePool,
    entry_id: i64,
    user_id: &str,
) -> Result<Option<EntryRow>, sqlx::Error> {
    sqlx::query_as::<_, EntryRow>("SELECT * FROM entries WHERE id = ? AND created_by = ?")
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
