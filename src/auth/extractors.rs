//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{debug, warn};

use super::handlers::find_or_create_user;
use super::models::Claims;
use crate::common::helpers::strip_bearer;
use crate::common::{safe_email_log, ApiError, AppState, SharedState};

/// Authenticated user extractor
///
/// Verifies the identity provider's HS256 token and resolves it to a local
/// user row, creating the row on first sight.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: String,
    pub email: String,
}

/// Decode and verify a bearer token against the configured secret.
/// `exp` is always enforced; `aud` only when an audience is configured.
pub fn verify_token(state: &AppState, token: &str) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    if let Some(audience) = &state.jwt_audience {
        validation.set_audience(&[audience.as_str()]);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        warn!(error = %e, "JWT token validation failed");
        ApiError::Unauthorized("invalid token".into())
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Extension containing the AppState
        let Extension(state_lock): Extension<SharedState> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        // DEV MODE: Bypass authentication completely
        if app_state.dev_mode.is_enabled() {
            let dev_user = app_state.dev_mode.dev_user();
            debug!(
                user_id = %dev_user.id,
                email = %safe_email_log(&dev_user.email),
                "DEV MODE: Authentication bypassed"
            );
            return Ok(AuthedUser {
                id: dev_user.id,
                email: dev_user.email,
            });
        }

        let header = match parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
        {
            Some(h) => h,
            None => {
                warn!("Authentication failed: missing Authorization header");
                return Err(ApiError::Unauthorized("missing auth".into()));
            }
        };

        let token = strip_bearer(header);
        if token.is_empty() {
            warn!("Authentication failed: empty bearer token");
            return Err(ApiError::Unauthorized("missing auth".into()));
        }

        let claims = verify_token(&app_state, token)?;
        let user = find_or_create_user(&app_state.db, &claims).await?;

        debug!(
            user_id = %user.id,
            email = %safe_email_log(&user.email),
            "User authentication successful via extractor"
        );

        Ok(AuthedUser {
            id: user.id,
            email: user.email,
        })
    }
}
