// src/common/config.rs
//! Environment-driven application configuration

use std::env;

use super::dev_mode::{apply_cli_override, DevModeConfig};

const DEFAULT_DATABASE_URL: &str = "sqlite://ojt_tracker.db";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set unless DEV_MODE is enabled")]
    MissingJwtSecret,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration assembled from the process environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_audience: Option<String>,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub required_hours_cache_ttl_secs: u64,
    pub dev_mode: DevModeConfig,
}

impl AppConfig {
    /// Read configuration from environment variables.
    /// `.env` should already be loaded by the caller.
    pub fn from_env() -> Result<Self, ConfigError> {
        let dev_mode = apply_cli_override(DevModeConfig::from_env());

        let jwt_secret = match env::var("JWT_SECRET").ok().filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None if dev_mode.is_enabled() => "dev_mode_unused_secret".to_string(),
            None => return Err(ConfigError::MissingJwtSecret),
        };

        let port = parse_port(env::var("PORT").ok().as_deref())?;

        let required_hours_cache_ttl_secs = match env::var("REQUIRED_HOURS_CACHE_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "REQUIRED_HOURS_CACHE_TTL_SECS",
                    value: raw.clone(),
                })?,
            Err(_) => DEFAULT_CACHE_TTL_SECS,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_audience: env::var("JWT_AUDIENCE").ok().filter(|s| !s.trim().is_empty()),
            port,
            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            required_hours_cache_ttl_secs,
            dev_mode,
        })
    }
}

/// Parses PORT, falling back to the default when unset
pub fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            key: "PORT",
            value: value.to_string(),
        }),
    }
}

/// Splits a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
