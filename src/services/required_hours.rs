// src/services/required_hours.rs
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::auth::models::User;
use crate::common::ApiError;

/// Upper bound on the configurable TTL (one year)
const MAX_CACHE_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, thiserror::Error)]
pub enum RequiredHoursError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<RequiredHoursError> for ApiError {
    fn from(err: RequiredHoursError) -> Self {
        match err {
            RequiredHoursError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            RequiredHoursError::DatabaseError(e) => ApiError::DatabaseError(e),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedHours {
    hours: u32,
    expires_at: DateTime<Utc>,
}

/// Cached targets plus a per-user write counter. A read that started
/// before a write may only populate the cache if the counter is unchanged.
#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CachedHours>,
    generations: HashMap<String, u64>,
}

impl CacheState {
    fn generation(&self, user_id: &str) -> u64 {
        self.generations.get(user_id).copied().unwrap_or(0)
    }
}

/// Read-through cache over `users.req_hours`.
///
/// Every write to a user's target must go through [`set`](Self::set) or be
/// followed by [`invalidate`](Self::invalidate), otherwise progress can be
/// computed against a stale target until the entry expires.
#[derive(Debug)]
pub struct RequiredHoursService {
    db_pool: SqlitePool,
    cache: Arc<RwLock<CacheState>>,
    cache_ttl: Duration,
}

impl RequiredHoursService {
    pub fn new(db_pool: SqlitePool, ttl_secs: u64) -> Self {
        let cache_ttl = Duration::seconds(ttl_secs.min(MAX_CACHE_TTL_SECS) as i64);
        Self {
            db_pool,
            cache: Arc::new(RwLock::new(CacheState::default())),
            cache_ttl,
        }
    }

    /// Required hours for `user_id`. Negative stored values read as 0.
    pub async fn get(&self, user_id: &str) -> Result<u32, RequiredHoursError> {
        // Check cache first
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.entries.get(user_id) {
                if cached.expires_at > Utc::now() {
                    debug!(user_id = %user_id, "Required hours retrieved from cache");
                    return Ok(cached.hours);
                }
            }
        }

        let (hours, generation) = self.load(user_id).await?;
        self.store_if_current(user_id, hours, generation).await;

        debug!(user_id = %user_id, hours, "Required hours retrieved from database");
        Ok(hours)
    }

    /// Persist a new target and drop the cached value
    pub async fn set(&self, user_id: &str, hours: u32) -> Result<User, RequiredHoursError> {
        let result = sqlx::query("UPDATE users SET req_hours = ? WHERE id = ?")
            .bind(i64::from(hours))
            .bind(user_id)
            .execute(&self.db_pool)
            .await;

        self.invalidate(user_id).await;

        if result?.rows_affected() == 0 {
            return Err(RequiredHoursError::UserNotFound(user_id.to_string()));
        }

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&self.db_pool)
            .await?;

        info!(user_id = %user_id, hours, "Required hours updated");
        Ok(user)
    }

    /// Drop the cached value so the next read goes to the database
    pub async fn invalidate(&self, user_id: &str) {
        let mut cache = self.cache.write().await;
        *cache.generations.entry(user_id.to_string()).or_insert(0) += 1;
        if cache.entries.remove(user_id).is_some() {
            debug!(user_id = %user_id, "Required hours cache invalidated");
        }
    }

    /// Database read tagged with the write generation observed before it
    async fn load(&self, user_id: &str) -> Result<(u32, u64), RequiredHoursError> {
        let generation = self.cache.read().await.generation(user_id);

        let stored: Option<(i64,)> = sqlx::query_as("SELECT req_hours FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.db_pool)
            .await?;

        let Some((raw,)) = stored else {
            warn!(user_id = %user_id, "Required hours requested for unknown user");
            return Err(RequiredHoursError::UserNotFound(user_id.to_string()));
        };

        let hours = u32::try_from(raw.max(0)).unwrap_or(u32::MAX);
        Ok((hours, generation))
    }

    /// Cache `hours` unless a write happened since `generation` was read
    async fn store_if_current(&self, user_id: &str, hours: u32, generation: u64) -> bool {
        let mut cache = self.cache.write().await;
        if cache.generation(user_id) != generation {
            debug!(user_id = %user_id, "Discarding required hours read that raced a write");
            return false;
        }

        cache.entries.insert(
            user_id.to_string(),
            CachedHours {
                hours,
                expires_at: Utc::now() + self.cache_ttl,
            },
        );
        true
    }
}
