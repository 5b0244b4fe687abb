// src/common/dev_mode.rs
//! Development mode configuration and utilities
//! Allows bypassing token verification for local testing

use sqlx::SqlitePool;
use std::env;
use tracing::info;

use crate::auth::models::User;

/// Fixed id so every dev-mode request owns the same entries
pub const DEV_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

#[derive(Debug, Clone, Default)]
pub struct DevModeConfig {
    pub enabled: bool,
    pub user_email: String,
    pub user_name: String,
}

impl DevModeConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("DEV_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        let user_email = env::var("DEV_USER_EMAIL").unwrap_or_else(|_| "dev@test.com".to_string());

        let user_name = env::var("DEV_USER_NAME").unwrap_or_else(|_| "Dev User".to_string());

        Self {
            enabled,
            user_email,
            user_name,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The user every request is attributed to while dev mode is on
    pub fn dev_user(&self) -> User {
        User {
            id: DEV_USER_ID.to_string(),
            email: self.user_email.clone(),
            name: self.user_name.clone(),
            req_hours: 0,
            created_at: None,
        }
    }
}

/// Make sure the dev user row exists so entries have an owner.
/// Existing profile fields (name, required hours) are left alone.
pub async fn ensure_dev_user(pool: &SqlitePool, config: &DevModeConfig) -> Result<(), sqlx::Error> {
    let user = config.dev_user();
    sqlx::query("INSERT OR IGNORE INTO users (id, email, name, req_hours) VALUES (?, ?, ?, 0)")
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.name)
        .execute(pool)
        .await?;

    info!(user_id = %user.id, "Dev user ready");
    Ok(())
}

/// Print dev mode status on startup
pub fn print_dev_mode_status(config: &DevModeConfig) {
    if config.enabled {
        println!("⚠️  🔓 DEV MODE ENABLED 🔓 ⚠️");
        println!("   Token verification bypassed");
        println!("   Dev User: {} ({})", config.user_name, config.user_email);
        println!("   ⚠️  DO NOT USE IN PRODUCTION ⚠️");
        println!();
    } else {
        println!("🔒 Production mode - Authentication required");
    }
}

/// CLI argument parsing for dev mode
fn parse_dev_mode_args<I>(args: I) -> Option<bool>
where
    I: IntoIterator<Item = String>,
{
    let mut decision = None;
    for arg in args {
        match arg.as_str() {
            "--dev" | "--dev-mode" => decision = Some(true),
            "--no-dev" | "--prod" | "--production" => decision = Some(false),
            _ => {}
        }
    }

    decision
}

/// Override dev mode from CLI args
pub fn apply_cli_override(mut config: DevModeConfig) -> DevModeConfig {
    if let Some(cli_dev_mode) = parse_dev_mode_args(env::args()) {
        println!("🔧 CLI override: DEV_MODE = {}", cli_dev_mode);
        config.enabled = cli_dev_mode;
    }

    config
}
